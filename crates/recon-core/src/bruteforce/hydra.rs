//! hydra `http-post-form` command construction

use recon_tools::CommandLine;
use url::Url;

use super::form::AttemptTranscript;
use crate::runner::CommandExecutor;
use crate::{Error, Result};

/// Fixed password tried while enumerating usernames.
pub const FIXED_PASSWORD: &str = "TEST";

/// Which credential hydra iterates over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydraMode {
    /// Wordlist of usernames against a fixed password
    Username,
    /// Wordlist of passwords for one known user
    Password { user: String },
}

impl HydraMode {
    pub fn label(&self) -> &'static str {
        match self {
            HydraMode::Username => "username",
            HydraMode::Password { .. } => "password",
        }
    }
}

/// Form field names plus the text shown on a failed login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub username: String,
    pub password: String,
    pub failure: String,
}

impl FormFields {
    /// Parse a `user_field###password_field###failure` answer.
    pub fn from_model_answer(answer: &str) -> Result<Self> {
        let parts: Vec<&str> = answer.trim().split("###").map(str::trim).collect();
        match parts.as_slice() {
            [username, password, failure]
                if !username.is_empty() && !password.is_empty() && !failure.is_empty() =>
            {
                Ok(Self {
                    username: username.to_string(),
                    password: password.to_string(),
                    failure: failure.to_string(),
                })
            }
            _ => Err(Error::ModelAnswer {
                answer: answer.trim().to_string(),
            }),
        }
    }
}

/// Host, port and path hydra attacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydraTarget {
    pub host: String,
    pub port: u16,
    pub path: String,
    pub tls: bool,
}

impl HydraTarget {
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url.host_str().ok_or_else(|| Error::LoginForm {
            reason: format!("'{url}' has no host"),
        })?;
        Ok(Self {
            host: host.to_string(),
            port: url.port_or_known_default().unwrap_or(80),
            path: url.path().to_string(),
            tls: url.scheme() == "https",
        })
    }

    fn module(&self) -> &'static str {
        if self.tls {
            "https-post-form"
        } else {
            "http-post-form"
        }
    }
}

/// Build the hydra command line.
///
/// Username mode: `hydra -L <wordlist> -p TEST -s <port> <host>
/// http-post-form "<path>:<user>=^USER^&<pass>=TEST:F=<failure>" -V`.
/// Password mode fixes the user, iterates `-P <wordlist>` and stops at the
/// first hit (`-Vf`).
pub fn hydra_command(
    target: &HydraTarget,
    mode: &HydraMode,
    fields: &FormFields,
    wordlist: &str,
) -> CommandLine {
    let user_field = escape_colons(&fields.username);
    let pass_field = escape_colons(&fields.password);
    let failure = escape_colons(&fields.failure);
    let path = escape_colons(&target.path);

    let (credentials, body, verbosity) = match mode {
        HydraMode::Username => (
            ["-L", wordlist, "-p", FIXED_PASSWORD],
            format!("{user_field}=^USER^&{pass_field}={FIXED_PASSWORD}"),
            "-V",
        ),
        HydraMode::Password { user } => (
            ["-l", user.as_str(), "-P", wordlist],
            format!("{user_field}={}&{pass_field}=^PASS^", escape_colons(user)),
            "-Vf",
        ),
    };

    CommandLine::new("hydra")
        .args(credentials)
        .arg("-s")
        .arg(target.port.to_string())
        .arg(&target.host)
        .arg(target.module())
        .arg(format!("{path}:{body}:F={failure}"))
        .arg(verbosity)
}

/// hydra splits the form spec on `:`; literal colons need a backslash.
fn escape_colons(value: &str) -> String {
    value.replace(':', "\\:")
}

/// Prompt asking a model for the field names and failure text.
pub fn model_prompt(mode: &HydraMode, transcript: &AttemptTranscript) -> String {
    let goal = match mode {
        HydraMode::Username => format!(
            "We want to brute-force the username field with the fixed password '{FIXED_PASSWORD}'."
        ),
        HydraMode::Password { user } => {
            format!("We want to brute-force the password field for the fixed user '{user}'.")
        }
    };
    format!(
        "{goal}\n\n\
         Here is a failed login attempt.\n\
         1. HTTP request:\n{}\n\n\
         2. HTTP response:\n{}\n\n\
         Identify the username field name, the password field name and a string \
         that only appears when authentication fails.\n\
         Answer with exactly: username_field###password_field###failure_string\n\
         No explanation and no Markdown.",
        transcript.request, transcript.response
    )
}

/// Run the model command with the prompt on stdin and parse its answer.
pub async fn ask_model<E: CommandExecutor>(
    executor: &E,
    model_cmd: &str,
    prompt: &str,
) -> Result<FormFields> {
    let words = shell_words::split(model_cmd).map_err(|e| Error::ModelAnswer {
        answer: format!("cannot split model command '{model_cmd}': {e}"),
    })?;
    let (program, args) = words.split_first().ok_or_else(|| Error::ModelAnswer {
        answer: "empty model command".to_string(),
    })?;

    let cmd = CommandLine::new(program.as_str())
        .args(args.iter().map(String::as_str))
        .stdin(prompt);
    tracing::debug!(command = %cmd, "Asking model for form fields");

    let execution = executor.execute(&cmd).await?;
    if !execution.success() {
        return Err(Error::ModelAnswer {
            answer: execution
                .stderr_tail()
                .unwrap_or("model command failed")
                .to_string(),
        });
    }
    FormFields::from_model_answer(&execution.stdout)
}
