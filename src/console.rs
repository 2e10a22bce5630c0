//! Interactive prompt loop

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    commands::{CommandHandler, Reply},
    error::AppResult,
};

pub const GREETING: &str = "Type a command. For more information type \"help\".";
pub const PROMPT: &str = "> ";

/// Line-oriented console over any async reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read, dispatch and print until `exit` or end of input
    pub async fn run(&mut self, handler: &CommandHandler) -> AppResult<()> {
        loop {
            self.write(&format!("\n{}\n{}", GREETING, PROMPT)).await?;

            let Some(line) = self.read_line().await? else {
                tracing::info!("Input closed");
                break;
            };

            match handler.handle(&line).await {
                Reply::Exit => break,
                Reply::Nothing => {}
                Reply::Message(message) => self.write(&format!("\n{}\n", message)).await?,
                Reply::Collect(form) => {
                    self.write("\n").await?;

                    let mut answers = Vec::with_capacity(form.prompts().len());
                    for prompt in form.prompts() {
                        self.write(prompt).await?;
                        match self.read_line().await? {
                            Some(answer) => answers.push(answer),
                            None => {
                                tracing::info!("Input closed while collecting {:?} answers", form);
                                return Ok(());
                            }
                        }
                    }

                    let message = handler.process_answers(form, answers).await;
                    self.write(&format!("\n{}\n", message)).await?;
                }
            }
        }

        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()))
    }

    async fn write(&mut self, text: &str) -> AppResult<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
