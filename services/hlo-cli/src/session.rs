//! Token bootstrap and the interactive menu
//!
//! Bootstrap resolves the user and access tokens (arguments, environment,
//! token files, then prompts), builds the client and obtains an access
//! token if only a user token is known. The menu loop then runs until Exit
//! or end of input. Errors inside the loop are printed and the loop
//! continues.

use std::io::Write;

use anyhow::{Context, Result, bail};
use common::Secret;
use hlo_api::{AcquireAccessTokenRequest, GetCharacterBulkRequest, HloClient, TokenStore};
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

use crate::console::Console;
use crate::output;

/// Tokens found before prompting, in precedence order per token.
#[derive(Debug, Default)]
pub struct KnownTokens {
    pub user_token: Option<Secret<String>>,
    pub access_token: Option<Secret<String>>,
    pub save_access_token: bool,
}

impl KnownTokens {
    /// Fill gaps from the token files.
    pub async fn with_stored(mut self, store: &TokenStore) -> Result<Self> {
        if self.user_token.is_none() {
            self.user_token = store.read_user_token().await?;
        }
        if self.access_token.is_none() {
            self.access_token = store.read_access_token().await?;
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    GetCharacter,
    GetCharacters,
    GetCastList,
    VerifyAccessToken,
    Exit,
}

impl Action {
    const ALL: [Action; 5] = [
        Action::GetCharacter,
        Action::GetCharacters,
        Action::GetCastList,
        Action::VerifyAccessToken,
        Action::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::GetCharacter => "Get Character",
            Action::GetCharacters => "Get Characters",
            Action::GetCastList => "Get Cast List",
            Action::VerifyAccessToken => "Verify Access Token",
            Action::Exit => "Exit",
        }
    }

    /// By menu number or by (case-insensitive) label.
    fn parse(choice: &str) -> Option<Self> {
        if let Ok(n) = choice.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        Self::ALL
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(choice))
    }
}

pub struct Session<R, W> {
    api: HloClient,
    store: TokenStore,
    console: Console<R, W>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(api: HloClient, store: TokenStore, console: Console<R, W>) -> Self {
        Self {
            api,
            store,
            console,
        }
    }

    #[cfg(test)]
    pub fn api(&self) -> &HloClient {
        &self.api
    }

    #[cfg(test)]
    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Prompt for whichever tokens are still unknown. Fails when neither
    /// token can be determined.
    pub async fn prompt_for_tokens(
        console: &mut Console<R, W>,
        mut tokens: KnownTokens,
    ) -> Result<KnownTokens> {
        if tokens.access_token.is_none() && tokens.user_token.is_none() {
            tokens.access_token = console.ask_optional("Access Token").await?.map(Secret::new);
            if tokens.access_token.is_none() {
                tokens.user_token = console.ask_optional("User Token").await?.map(Secret::new);
            }
            if (tokens.access_token.is_some() || tokens.user_token.is_some())
                && !tokens.save_access_token
            {
                tokens.save_access_token = console.confirm("Store access token?").await?;
            }
        }

        if tokens.access_token.is_none() && tokens.user_token.is_none() {
            bail!(
                "User token or access token required. Pass as command-line argument or store in <user home>/.hlo-api/access_token"
            );
        }
        Ok(tokens)
    }

    /// Make sure the client holds an access token, exchanging the user token
    /// if needed, and persist it when asked to.
    pub async fn bootstrap(&mut self, save_access_token: bool) -> Result<()> {
        if self.api.access_token().is_none() {
            let response = self.api.acquire_access_token(None, true).await?;
            if !response.envelope.is_success() {
                let message = output::service_error(&response.envelope).unwrap_or_else(|| {
                    output::error_line(response.envelope.result.0, "access token not issued")
                });
                bail!("{message}");
            }
        }

        if save_access_token {
            self.store_access_token().await?;
        }
        Ok(())
    }

    /// Menu loop. Returns on Exit or end of input.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            for (i, action) in Action::ALL.iter().enumerate() {
                self.console.say(format!("{}) {}", i + 1, action.label()))?;
            }
            let Some(choice) = self.console.ask("Action").await? else {
                return Ok(());
            };
            let Some(action) = Action::parse(&choice) else {
                self.console.say(format!("Unknown action: {choice}"))?;
                continue;
            };
            debug!(action = action.label(), "menu action");

            let outcome = match action {
                Action::Exit => return Ok(()),
                Action::GetCharacter => self.get_character().await,
                Action::GetCharacters => self.get_characters().await,
                Action::GetCastList => self.get_cast_list().await,
                Action::VerifyAccessToken => self.verify().await,
            };
            if let Err(e) = outcome {
                let line = match e.downcast_ref::<hlo_api::Error>() {
                    Some(api_error) => output::error_line(api_error.result().0, api_error),
                    None => format!("Error: {e:#}"),
                };
                self.console.say(line)?;
            }
        }
    }

    async fn get_character(&mut self) -> Result<()> {
        let Some(token) = self.console.ask_optional("Element Token").await? else {
            return Ok(());
        };
        let response = self.api.get_character(token).await?;
        let text = output::character(&response)?;
        self.console.say(text)?;
        Ok(())
    }

    async fn get_characters(&mut self) -> Result<()> {
        let Some(tokens) = self
            .console
            .ask_optional("Element Tokens (comma separated)")
            .await?
        else {
            return Ok(());
        };
        let request: GetCharacterBulkRequest = tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();
        if request.characters.is_empty() {
            return Ok(());
        }

        let response = self.api.get_characters(request).await?;
        for line in output::characters(&response)? {
            self.console.say(line)?;
        }
        Ok(())
    }

    async fn get_cast_list(&mut self) -> Result<()> {
        let Some(campaign) = self.console.ask_optional("Campaign Token").await? else {
            return Ok(());
        };
        let response = self.api.get_cast_list(campaign).await?;
        for line in output::cast_list(&response) {
            self.console.say(line)?;
        }
        Ok(())
    }

    async fn verify(&mut self) -> Result<()> {
        let response = self.api.verify_access_token(None).await?;
        if response.is_success() {
            self.console.say("Access token is valid")?;
        } else {
            self.console.say("Access token is not valid")?;
        }

        if !self.console.confirm("Refresh access token?").await? {
            return Ok(());
        }
        let request = AcquireAccessTokenRequest::new(self.api.config().user_token().as_str())
            .tool_name(self.api.config().tool_name());
        let response = self.api.acquire_access_token(Some(request), true).await?;
        if let Some(line) = output::service_error(&response.envelope) {
            self.console.say(line)?;
            return Ok(());
        }
        self.console.say("Access token refreshed")?;

        if self.console.confirm("Store new access token?").await? {
            self.store_access_token().await?;
        }
        Ok(())
    }

    async fn store_access_token(&mut self) -> Result<()> {
        let Some(token) = self.api.access_token() else {
            return Ok(());
        };
        self.store
            .save_access_token(token)
            .await
            .with_context(|| {
                format!("failed to store access token in {}", self.store.dir().display())
            })?;
        info!(dir = %self.store.dir().display(), "access token stored");
        Ok(())
    }
}
