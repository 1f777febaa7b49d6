//! Login page discovery: URL normalisation, form parsing and a sample
//! failed attempt

use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use url::Url;
use url::form_urlencoded::Serializer;

use crate::{Error, Result};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Value sent in every field of the sample attempt.
pub const SAMPLE_VALUE: &str = "test";

/// Parse a login URL, defaulting to `http://` when no scheme is given.
pub fn normalize_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    Url::parse(&with_scheme).map_err(|source| Error::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// One named `<input>` of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    /// Lowercased `type` attribute, `text` when absent
    pub kind: String,
}

impl FormField {
    fn is_credential_candidate(&self) -> bool {
        matches!(self.kind.as_str(), "text" | "email" | "tel")
    }
}

/// The first `<form>` of a page and its named inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// `action` attribute, if any
    pub action: Option<String>,
    pub fields: Vec<FormField>,
}

impl LoginForm {
    /// Parse the first form of an HTML document.
    pub fn parse(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let form = document
            .select(&selector("form")?)
            .next()
            .ok_or_else(|| form_error("the page has no <form>"))?;

        let fields: Vec<FormField> = form
            .select(&selector("input[name]")?)
            .filter_map(field)
            .collect();
        if fields.is_empty() {
            return Err(form_error("the form has no named inputs"));
        }

        Ok(Self {
            action: form
                .value()
                .attr("action")
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string),
            fields,
        })
    }

    /// The password input, by type.
    pub fn password_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.kind == "password")
            .map(|f| f.name.as_str())
    }

    /// The username input: a text-like field whose name looks like a login,
    /// else the first text-like field.
    pub fn username_field(&self) -> Option<&str> {
        let candidates = || self.fields.iter().filter(|f| f.is_credential_candidate());
        candidates()
            .find(|f| {
                let name = f.name.to_lowercase();
                ["user", "login", "mail", "name"]
                    .iter()
                    .any(|hint| name.contains(hint))
            })
            .or_else(|| candidates().next())
            .map(|f| f.name.as_str())
    }

    /// Where the form posts to, resolved against the page URL.
    pub fn post_url(&self, page: &Url) -> Result<Url> {
        match &self.action {
            Some(action) => page.join(action).map_err(|source| Error::InvalidUrl {
                url: action.clone(),
                source,
            }),
            None => Ok(page.clone()),
        }
    }

    /// URL-encoded body with [`SAMPLE_VALUE`] in every field.
    pub fn sample_body(&self) -> String {
        let mut body = Serializer::new(String::new());
        for field in &self.fields {
            body.append_pair(&field.name, SAMPLE_VALUE);
        }
        body.finish()
    }
}

fn field(input: ElementRef<'_>) -> Option<FormField> {
    let attrs = input.value();
    let name = attrs.attr("name")?.trim();
    if name.is_empty() {
        return None;
    }
    Some(FormField {
        name: name.to_string(),
        kind: attrs
            .attr("type")
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "text".to_string()),
    })
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| form_error(format!("bad selector '{css}': {e}")))
}

fn form_error(reason: impl Into<String>) -> Error {
    Error::LoginForm {
        reason: reason.into(),
    }
}

/// Raw request and response of one failed login, as shown to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptTranscript {
    pub request: String,
    pub response: String,
}

/// HTTP client for CTF targets: short timeout, self-signed certificates
/// accepted.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(format!("recon/{}", env!("CARGO_PKG_VERSION")))
        .danger_accept_invalid_certs(true)
        .build()?)
}

/// Fetch the page and parse its login form.
pub async fn fetch_login_form(client: &reqwest::Client, page: &Url) -> Result<LoginForm> {
    tracing::debug!(url = %page, "Fetching login page");
    let html = client
        .get(page.clone())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    LoginForm::parse(&html)
}

/// Post [`SAMPLE_VALUE`] in every field and record both sides of the
/// exchange.
pub async fn sample_attempt(
    client: &reqwest::Client,
    page: &Url,
    form: &LoginForm,
) -> Result<AttemptTranscript> {
    let target = form.post_url(page)?;
    let body = form.sample_body();
    let host = host_header(&target);

    let response = client
        .post(target.clone())
        .header(reqwest::header::HOST, &host)
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body.clone())
        .send()
        .await?;
    tracing::debug!(url = %target, status = %response.status(), "Sample login posted");

    let request = format!(
        "POST {} HTTP/1.1\nHost: {}\nContent-Type: application/x-www-form-urlencoded\n\n{}",
        target.path(),
        host,
        body
    );

    let mut head = format!("{:?} {}\n", response.version(), response.status());
    for (name, value) in response.headers() {
        head.push_str(&format!(
            "{}: {}\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    let text = response.text().await?;

    Ok(AttemptTranscript {
        request,
        response: format!("{head}\n{text}"),
    })
}

fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const LOGIN_PAGE: &str = r#"
<html><body>
  <form method="post" action="/login.php">
    <input type="hidden" name="csrf" value="abc">
    <input name="uname">
    <input type="password" name="pass">
    <input type="submit" value="Login">
  </form>
</body></html>
"#;

    #[rstest]
    #[case("box.htb", "http://box.htb/")]
    #[case("10.0.0.5:8080/login", "http://10.0.0.5:8080/login")]
    #[case("  box.htb/admin  ", "http://box.htb/admin")]
    #[case("https://box.htb/login", "https://box.htb/login")]
    #[case("http://box.htb:8080", "http://box.htb:8080/")]
    fn test_normalize_url(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_url(raw).unwrap().as_str(), expected);
    }

    #[test]
    fn test_normalize_url_rejects_garbage() {
        assert!(matches!(
            normalize_url("http://"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_parse_login_form() {
        let form = LoginForm::parse(LOGIN_PAGE).unwrap();

        assert_eq!(form.action.as_deref(), Some("/login.php"));
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["csrf", "uname", "pass"]);
        assert_eq!(form.username_field(), Some("uname"));
        assert_eq!(form.password_field(), Some("pass"));
        assert_eq!(form.sample_body(), "csrf=test&uname=test&pass=test");
    }

    #[test]
    fn test_username_prefers_login_like_names() {
        let form = LoginForm::parse(
            r#"<form><input name="q"><input type="email" name="email">
               <input type="password" name="pw"></form>"#,
        )
        .unwrap();
        assert_eq!(form.username_field(), Some("email"));
    }

    #[test]
    fn test_post_url_resolves_action() {
        let form = LoginForm::parse(LOGIN_PAGE).unwrap();
        let page = normalize_url("box.htb/admin/index.php").unwrap();
        assert_eq!(
            form.post_url(&page).unwrap().as_str(),
            "http://box.htb/login.php"
        );

        let no_action = LoginForm::parse(r#"<form><input name="u"></form>"#).unwrap();
        assert_eq!(no_action.post_url(&page).unwrap(), page);
    }

    #[rstest]
    #[case("<html><body>No form here</body></html>", "no <form>")]
    #[case(r#"<form><input type="submit"></form>"#, "no named inputs")]
    fn test_parse_rejects_unusable_pages(#[case] html: &str, #[case] reason: &str) {
        match LoginForm::parse(html) {
            Err(Error::LoginForm { reason: got }) => assert!(got.contains(reason), "{got}"),
            other => panic!("Expected LoginForm error, got {:?}", other),
        }
    }

    #[test]
    fn test_host_header_includes_default_port() {
        assert_eq!(
            host_header(&normalize_url("box.htb").unwrap()),
            "box.htb:80"
        );
        assert_eq!(
            host_header(&normalize_url("https://box.htb:8443/").unwrap()),
            "box.htb:8443"
        );
    }
}
