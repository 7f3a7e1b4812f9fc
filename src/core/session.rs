//! Interactive session: identify the account, list declared secrets, and
//! reconcile whichever one the operator picks until they quit.

use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::constants::INDEX_PROMPT;
use crate::core::domain::{Secret, SecretGroup, Status};
use crate::core::prompt::{Answer, Prompt};
use crate::core::reconcile::{Outcome, Reconciler};
use crate::core::report::{Emphasis, Reporter};
use crate::core::store::{Clients, Connector, Identity};
use crate::core::validation;
use crate::error::{Error, Result};

/// Owns the per-region store clients and the collaborators for one run.
pub struct Session<'a, C> {
    clients: Clients<C>,
    identity: &'a dyn Identity,
    prompt: &'a mut dyn Prompt,
    reporter: &'a dyn Reporter,
    silent: bool,
}

impl<'a, C: Connector> Session<'a, C> {
    pub fn new(
        connector: C,
        identity: &'a dyn Identity,
        prompt: &'a mut dyn Prompt,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            clients: Clients::new(connector),
            identity,
            prompt,
            reporter,
            silent: false,
        }
    }

    /// Hide entered values instead of echoing them.
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Run the selection loop until the operator quits.
    ///
    /// # Returns
    ///
    /// The outcome of every reconciliation attempt, in order. Empty when no
    /// group is declared for the caller's account.
    ///
    /// # Errors
    ///
    /// Configuration errors in a matched group (before anything is listed),
    /// and any transport error. Contract violations are reported and the
    /// loop continues.
    pub fn run(&mut self, config: &Config) -> Result<Vec<Outcome>> {
        self.reporter.info("Checking account for current credentials");
        self.reporter
            .info("If any error is given, make sure you have valid credentials active");
        let account = self.identity.account_id()?;
        self.reporter.info(&format!(
            "Running for account {}",
            self.reporter.emphasize(&account, Emphasis::Identifier)
        ));
        self.reporter.log("");

        let groups = config.groups_for_account(&account);
        if groups.is_empty() {
            self.reporter
                .error("No secrets specified for this account - aborting");
            return Ok(Vec::new());
        }
        for group in &groups {
            validation::validate_group(group)?;
        }
        info!(account = %account, groups = groups.len(), "session started");

        let mut outcomes = Vec::new();
        while let Some((group, secret)) = self.select(&groups)? {
            self.reporter.log("");
            outcomes.push(self.reconcile(group, secret)?);
            self.reporter.log("");
        }

        debug!(attempts = outcomes.len(), "session finished");
        Ok(outcomes)
    }

    /// List every secret with its live status and read a selection.
    ///
    /// Empty input, cancellation, a non-numeric answer or an out-of-range
    /// index all end the loop.
    fn select<'g>(
        &mut self,
        groups: &[&'g SecretGroup],
    ) -> Result<Option<(&'g SecretGroup, &'g Secret)>> {
        let mut entries: Vec<(&'g SecretGroup, &'g Secret)> = Vec::new();

        self.reporter.log("Select secret to write:");
        self.reporter.log("");

        for &group in groups {
            self.reporter.log(&format!(
                "{} (prefix: {})",
                group.description, group.name_prefix
            ));

            let store = self.clients.get(&group.region)?;
            for secret in &group.secrets {
                let state = store.describe(&group.full_name(secret))?;
                self.reporter.log(&format!(
                    "  ({}) {} ({})",
                    entries.len(),
                    secret.name,
                    Status::of(state.as_ref())
                ));
                entries.push((group, secret));
            }
            self.reporter.log("");
        }

        let input = match self.prompt.read(INDEX_PROMPT, false)? {
            Answer::Value(input) => input,
            Answer::Cancelled => return Ok(None),
        };
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        match input.parse::<usize>().ok().and_then(|i| entries.get(i)) {
            Some(&entry) => Ok(Some(entry)),
            None => {
                debug!(input, "selection out of range");
                self.reporter.warn("Secret not found - aborting");
                Ok(None)
            }
        }
    }

    fn reconcile(&mut self, group: &SecretGroup, secret: &Secret) -> Result<Outcome> {
        let store = self.clients.get(&group.region)?;
        let mut reconciler = Reconciler::new(store, &mut *self.prompt, self.reporter, self.silent);

        match reconciler.reconcile(group, secret) {
            Err(Error::Contract(error)) => {
                self.reporter.error(&error.to_string());
                Ok(Outcome::Failed {
                    full_name: group.full_name(secret),
                    error,
                })
            }
            other => other,
        }
    }
}
