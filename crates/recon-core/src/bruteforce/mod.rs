//! Login brute-force helper
//!
//! Builds a hydra `http-post-form` command for a web login page:
//!
//! 1. [`normalize_url`] the page address (`http://` when no scheme)
//! 2. [`fetch_login_form`] and read its input names
//! 3. Take the failure text from the caller, or post one sample login and
//!    let a model command name the fields and the failure text
//! 4. [`hydra_command`] for the chosen [`HydraMode`]
//!
//! The command is returned, never executed.

mod form;
mod hydra;

pub use form::{
    AttemptTranscript, FormField, LoginForm, SAMPLE_VALUE, fetch_login_form, http_client,
    normalize_url, sample_attempt,
};
pub use hydra::{
    FIXED_PASSWORD, FormFields, HydraMode, HydraTarget, ask_model, hydra_command, model_prompt,
};

use recon_tools::CommandLine;
use url::Url;

use crate::runner::CommandExecutor;
use crate::{Error, Result};

/// Where the field names and failure text come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Fields guessed from the form; failure text given by the caller
    Failure(String),
    /// A model command reads a sample failed login and answers
    Model(String),
}

/// Build the hydra command for the login form at `page`.
pub async fn build_hydra_command<E: CommandExecutor>(
    executor: &E,
    page: &Url,
    mode: &HydraMode,
    source: &FieldSource,
    wordlist: &str,
) -> Result<CommandLine> {
    let client = http_client()?;
    let form = fetch_login_form(&client, page).await?;
    tracing::info!(
        url = %page,
        fields = form.fields.len(),
        mode = mode.label(),
        "Login form found"
    );

    let fields = match source {
        FieldSource::Failure(failure) => guessed_fields(&form, failure)?,
        FieldSource::Model(model_cmd) => {
            let transcript = sample_attempt(&client, page, &form).await?;
            ask_model(executor, model_cmd, &model_prompt(mode, &transcript)).await?
        }
    };

    let target = HydraTarget::from_url(&form.post_url(page)?)?;
    Ok(hydra_command(&target, mode, &fields, wordlist))
}

/// Field names read straight from the form.
pub fn guessed_fields(form: &LoginForm, failure: &str) -> Result<FormFields> {
    let missing = |what: &str| Error::LoginForm {
        reason: format!("no {what} field; pass --model-cmd to let a model pick"),
    };
    Ok(FormFields {
        username: form.username_field().ok_or_else(|| missing("username"))?.to_string(),
        password: form.password_field().ok_or_else(|| missing("password"))?.to_string(),
        failure: failure.to_string(),
    })
}
