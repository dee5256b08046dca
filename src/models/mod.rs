pub mod event;
pub mod fcm;
pub mod firestore;
pub mod health;
pub mod record;
