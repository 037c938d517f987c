use eel_client::{Config, EelClient, Mt, MtParams, OutboundMessage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let destination =
        std::env::var("EEL_DESTINATION").unwrap_or_else(|_| "18005882300".to_owned());
    let content = std::env::var("EEL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the eel-client demo.".to_owned());

    let client = EelClient::new(Config::from_env()?)?;
    let mut message = Mt::new(MtParams {
        client_message_id: 1234u64.into(),
        source: Some("12345".to_owned()),
        destination: Some(destination),
        carrier_id: Some("Att".to_owned()),
        content: Some(content),
    })?;

    match client.send(&mut message).await {
        Ok(true) => println!(
            "accepted, aggregator_message_id: {:?}",
            message.aggregator_message_id()
        ),
        Ok(false) => println!("not sent, invalid: {}", message.errors()),
        Err(err) => {
            println!("send failed: {err}");
            if let Some(response) = err.response() {
                println!("status: {}, body: {}", response.status, response.body);
            }
        }
    }

    Ok(())
}
