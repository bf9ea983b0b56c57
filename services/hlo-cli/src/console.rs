//! Line-oriented prompts over any async reader and writer.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line. `None` at end of input.
    pub async fn ask(&mut self, question: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `ask`, but an empty answer counts as no answer.
    pub async fn ask_optional(&mut self, question: &str) -> std::io::Result<Option<String>> {
        Ok(self.ask(question).await?.filter(|answer| !answer.is_empty()))
    }

    /// Yes/no question defaulting to no.
    pub async fn confirm(&mut self, question: &str) -> std::io::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N]")).await?;
        Ok(answer.is_some_and(|a| matches!(a.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl AsRef<str>) -> std::io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}
