use secrecy::ExposeSecret;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use crate::client::config::Config;
use crate::client::consts::API_KEY_HEADER;

pub fn stream_input_url(config: &Config) -> String {
    format!(
        "{}/text-to-speech/{}/stream-input?model_id={}&inactivity_timeout={}",
        config.base_url(),
        config.voice_id(),
        config.model_id(),
        config.inactivity_timeout()
    )
}

pub fn build_request(config: &Config) -> tokio_tungstenite::tungstenite::Result<Request> {
    let mut request = stream_input_url(config).into_client_request()?;
    request
        .headers_mut()
        .insert(API_KEY_HEADER, config.api_key().expose_secret().parse()?);
    Ok(request)
}
