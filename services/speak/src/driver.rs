use crate::connection::{Connector, SpeechConnection};
use crate::console::{ConsoleInput, PROMPT};
use crate::playback::Playback;
use anyhow::{Context, Result};
use elevenlabs_stream::consts::KEEP_ALIVE_INTERVAL;
use elevenlabs_stream::types::{ClientMessage, VoiceSettings};
use elevenlabs_stream::KeepAlive;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// How the sending phase of a segment ended.
#[derive(Debug, PartialEq, Eq)]
enum SegmentEnd {
    /// `done`: flush was sent, audio should be received and played.
    Flushed,
    /// `exit`: quit without playing.
    Exit,
    /// Console input ran out: quit without playing.
    InputClosed,
}

/// Runs segments back to back: one connection per segment, lines in, audio out.
pub struct Driver<C, P> {
    connector: C,
    playback: P,
    voice_settings: VoiceSettings,
    keep_alive_interval: Duration,
    prompt: bool,
}

impl<C, P> Driver<C, P>
where
    C: Connector,
    P: Playback,
{
    pub fn new(connector: C, playback: P, voice_settings: VoiceSettings) -> Self {
        Self {
            connector,
            playback,
            voice_settings,
            keep_alive_interval: KEEP_ALIVE_INTERVAL,
            prompt: false,
        }
    }

    pub fn with_keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = interval;
        self
    }

    /// Print `> ` before each read.
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Reads `input` until `exit` or end of input.
    ///
    /// Returns `Ok(())` on either of those. Every other failure (connect, send, receive,
    /// write, play) ends the run with an error and nothing is retried.
    pub async fn run<R>(&mut self, mut input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {

        loop {
            let mut connection = self
                .connector
                .connect()
                .await
                .context("failed to open stream")?;

            match self.send_segment(&connection, &mut input).await {
                Ok(SegmentEnd::Flushed) => {}
                Ok(SegmentEnd::Exit) => {
                    tracing::info!("Exiting.");
                    connection.close().await;
                    return Ok(());
                }
                Ok(SegmentEnd::InputClosed) => {
                    tracing::info!("Input closed, exiting.");
                    connection.close().await;
                    return Ok(());
                }
                Err(e) => {
                    connection.close().await;
                    return Err(e);
                }
            }

            let audio = connection.receive_audio().await;
            connection.close().await;
            let audio = audio.context("failed to receive audio")?;

            self.playback.write(&audio).await?;
            self.playback.play().await?;
        }
    }

    /// The sending phase. The keep-alive task never outlives this call.
    async fn send_segment<S, R>(&self, connection: &S, input: &mut R) -> Result<SegmentEnd>
    where
        S: SpeechConnection,
        R: AsyncBufRead + Unpin,
    {
        let mut keep_alive = None;
        let end = self.send_lines(connection, input, &mut keep_alive).await;
        if let Some(keep_alive) = keep_alive {
            keep_alive.stop().await;
        }
        end
    }

    async fn send_lines<S, R>(
        &self,
        connection: &S,
        input: &mut R,
        keep_alive: &mut Option<KeepAlive>,
    ) -> Result<SegmentEnd>
    where
        S: SpeechConnection,
        R: AsyncBufRead + Unpin,
    {
        let mut first = true;

        loop {
            self.show_prompt();
            let line = match read_line(input).await {
                Ok(Some(line)) => line,
                Ok(None) => return Ok(SegmentEnd::InputClosed),
                Err(e) => {
                    tracing::warn!("console read error: {}", e);
                    return Ok(SegmentEnd::InputClosed);
                }
            };

            match ConsoleInput::parse(&line) {
                ConsoleInput::Blank => continue,
                ConsoleInput::Exit => return Ok(SegmentEnd::Exit),
                ConsoleInput::Done => {
                    // No ping may follow the flush.
                    if let Some(keep_alive) = keep_alive.take() {
                        keep_alive.stop().await;
                    }
                    tracing::info!("→ sending flush");
                    connection
                        .send(&ClientMessage::flush())
                        .await
                        .context("flush send error")?;
                    return Ok(SegmentEnd::Flushed);
                }
                ConsoleInput::Text(text) => {
                    if first {
                        *keep_alive =
                            Some(KeepAlive::spawn(connection.sink(), self.keep_alive_interval));

                        tracing::info!("→ sending init");
                        connection
                            .send(&ClientMessage::init(self.voice_settings))
                            .await
                            .context("init send error")?;
                        first = false;
                    }

                    tracing::info!("→ sending text: {:?}", text);
                    connection
                        .send(&ClientMessage::text(text))
                        .await
                        .context("text send error")?;
                }
            }
        }
    }

    fn show_prompt(&self) {
        if self.prompt {
            print!("{}", PROMPT);
            let _ = std::io::stdout().flush();
        }
    }
}

/// Reads one console line without its `\n` or `\r\n`. Bytes that are not valid UTF-8 are
/// replaced with U+FFFD rather than rejecting the line. `Ok(None)` means end of input.
async fn read_line<R>(input: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
