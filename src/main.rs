use anyhow::{Error, Result};
use futures_util::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use push_dispatcher::{
    api::run_api_server,
    clients::{fcm::FcmClient, firestore::FirestoreClient, rbmq::RabbitMqClient},
    config::Config,
    dispatcher::NotificationDispatcher,
    models::event::MessageCreatedEvent,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load()?;

    let api_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) = run_api_server(api_config).await {
            error!(error = %e, "Health check server exited");
        }
    });

    let rabbitmq = RabbitMqClient::connect(&config).await?;
    let dispatcher =
        NotificationDispatcher::new(FirestoreClient::new(&config), FcmClient::new(&config));

    info!("Worker started, waiting for message-created events");

    let mut consumer = rabbitmq.create_consumer().await?;

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                error!(error = %e, "Failed to receive delivery from queue");
                continue;
            }
        };

        let event = match serde_json::from_slice::<MessageCreatedEvent>(&delivery.data) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Discarding undecodable event payload");
                rabbitmq.reject(delivery.delivery_tag, false).await?;
                continue;
            }
        };

        match dispatcher.handle_message_created(&event).await {
            Ok(_) => {
                rabbitmq.acknowledge(delivery.delivery_tag).await?;
            }
            Err(e) => {
                // Chat lookup failed, the audience is unknown. Hand the
                // event back to the broker's error channel; this worker
                // does not retry.
                error!(
                    chat_id = %event.chat_id,
                    message_id = %event.message_id,
                    error = %e,
                    "Dispatch failed"
                );
                rabbitmq.reject(delivery.delivery_tag, false).await?;
            }
        }
    }

    Ok(())
}
