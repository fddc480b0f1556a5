//! insta-dl - CLI entry point.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, EnvFilter};

use insta_dl::{
    api::{InstagramApi, MediaClient},
    cli::{Args, Command},
    config::ClientOptions,
    download::{download_post, DownloadRequest, Outcome},
    error::{exit_codes, Error, Result},
    journal::Journal,
    output::{print_error, print_info, print_success, print_warning},
    session::{Browser, BrowserCookieSource, CookieSource, Session, SessionStore},
    urls::{clean_url, extract_shortcode},
};

/// Cookie domain imported from the browser store.
const COOKIE_DOMAIN: &str = ".instagram.com";

#[tokio::main]
async fn main() -> ExitCode {
    // A local .env may provide INSTA_DL_DIR
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    // A bare invocation prints usage and succeeds
    if args.command.is_none() && args.tokens.is_empty() {
        let _ = Args::command().print_help();
        return ExitCode::from(exit_codes::SUCCESS as u8);
    }

    match run(args).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            let code = match e {
                Error::Usage(_) => exit_codes::USAGE_ERROR,
                Error::Session(_) | Error::CookieExtraction(_) => exit_codes::SESSION_ERROR,
                Error::InvalidUrl(_) | Error::UrlParse(_) => exit_codes::INPUT_ERROR,
                Error::Api(_) | Error::Http(_) => exit_codes::API_ERROR,
                Error::Download(_) => exit_codes::DOWNLOAD_ERROR,
                _ => exit_codes::UNEXPECTED_ERROR,
            };
            ExitCode::from(code as u8)
        }
    }
}

async fn run(args: Args) -> Result<()> {
    if let Some(Command::Init { browser }) = &args.command {
        return init_session(browser).await;
    }

    let download = args.download_args()?;
    let base_dir = args.resolved_output_dir()?;

    let url = clean_url(&download.url)?;
    let shortcode = extract_shortcode(&url)?;

    let mut options = ClientOptions::default();
    options.apply_overrides(download.overrides.clone());

    let store = SessionStore::from_project_dirs()?;
    let session = store.load()?.ok_or_else(|| {
        Error::Session("No saved session found. Run:  insta-dl init [browser]".to_string())
    })?;

    print_info(&format!(
        "Fetching {} (session: {})...",
        shortcode, session.username
    ));

    let client = InstagramApi::new(&session.cookies)?;
    let journal = Journal::new(&base_dir);

    let request = DownloadRequest {
        url,
        shortcode,
        max_title_len: download.max_title_len,
        base_dir,
    };

    match download_post(&client, &journal, &options, &request).await? {
        Outcome::AlreadyDownloaded { shortcode } => {
            print_info(&format!("Already downloaded: {}", shortcode));
        }
        Outcome::Saved { path, files } => {
            tracing::debug!("saved {} file(s)", files);
            print_success(&format!("Saved: {}", path.display()));
        }
    }

    Ok(())
}

/// Import a session from a browser cookie store, unless a valid one exists.
async fn init_session(browser: &str) -> Result<()> {
    let store = SessionStore::from_project_dirs()?;

    if let Some(session) = store.load()? {
        let client = InstagramApi::new(&session.cookies)?;
        match client.logged_in_user().await {
            Ok(Some(username)) => {
                print_info(&format!("Session already exists for {}.", username));
                return Ok(());
            }
            _ => print_warning(&format!(
                "Stored session for {} is no longer valid, re-importing.",
                session.username
            )),
        }
    }

    let browser: Browser = browser.parse()?;
    let source = BrowserCookieSource::new(browser);
    let cookies = source.cookies(COOKIE_DOMAIN)?;

    if cookies.is_empty() {
        return Err(Error::Session(format!(
            "No Instagram cookies found in {}. Make sure you're logged into Instagram in that browser.",
            browser
        )));
    }

    let client = InstagramApi::new(&cookies)?;
    let username = client.logged_in_user().await?.ok_or_else(|| {
        Error::Session(format!(
            "No active Instagram session found in {}. Make sure you're logged into Instagram in that browser.",
            browser
        ))
    })?;

    store.save(&Session {
        username: username.clone(),
        cookies,
    })?;
    print_success(&format!("Session saved for {} (from {}).", username, browser));

    Ok(())
}
