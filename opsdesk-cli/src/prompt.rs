//! Terminal confirmation

use std::io::BufRead;
use std::io::Write;

use async_trait::async_trait;
use opsdesk_lib::confirm::Confirm;

/// Asks on stderr and reads the answer from stdin. Only `y`/`yes` accept.
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, text: &str) -> bool {
        let question = text.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "{question} [y/N] ");
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_yes(&line),
            _ => false,
        }
    }
}

fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
