use async_trait::async_trait;
use grimm_runtime::{ChatMessage, MessageSink};

/// Prints cards to stdout and warnings to stderr.
pub struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn post(&self, message: ChatMessage) {
        println!("[{}]", message.speaker);
        println!("{}", message.content);
    }

    async fn warn(&self, text: &str) {
        eprintln!("warning: {text}");
    }
}
