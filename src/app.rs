use anyhow::{Context, Result};
use serde::Serialize;
use url::Url;

use crate::{
    config::AppConfig,
    domain::FeatureRecord,
    phishing::{PageFetcher, PhishingPredictor},
    spam::SpamPredictor,
};

const SAMPLE_INPUTS: [&str; 4] = [
    "Congratulations! You've won a free iPhone. Click here to claim now.",
    "Hi team, the quarterly review meeting moved to Thursday at 10am. Agenda attached.",
    "http://paypal-secure-login.com/verify?acct=1",
    "https://www.rust-lang.org/",
];

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Verdict<'a> {
    Mail {
        input: &'a str,
        is_spam: bool,
        label: &'static str,
    },
    Url {
        input: &'a str,
        label: &'static str,
        features: FeatureRecord,
    },
}

pub struct GuardApp {
    spam: SpamPredictor,
    phishing: PhishingPredictor,
}

impl GuardApp {
    /// Loads every model artifact up front; nothing is classified unless all load.
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let spam = SpamPredictor::load(&config.models).context("failed to load spam model")?;
        let fetcher = PageFetcher::new(config.web.clone())?;
        let phishing = PhishingPredictor::load(&config.models, fetcher)
            .context("failed to load phishing model")?;
        Ok(Self { spam, phishing })
    }

    pub async fn run(&self, inputs: Vec<String>) -> Result<()> {
        let inputs = if inputs.is_empty() {
            tracing::info!(target: "app", "no inputs given; classifying built-in samples");
            SAMPLE_INPUTS.iter().map(|s| s.to_string()).collect()
        } else {
            inputs
        };

        let mut failures = 0usize;
        for input in &inputs {
            match self.classify(input).await {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    failures += 1;
                    tracing::error!(target: "app", error = %err, "classification failed");
                }
            }
        }

        tracing::info!(target: "app", total = inputs.len(), failures, "done");
        ensure_all_classified(inputs.len(), failures)
    }

    async fn classify(&self, input: &str) -> Result<String> {
        let verdict = if looks_like_url(input) {
            let features = self.phishing.extract_features(input).await?;
            let label = self.phishing.predict_record(&features)?;
            Verdict::Url {
                input,
                label: label.as_str(),
                features,
            }
        } else {
            let label = self.spam.predict_text(input)?;
            Verdict::Mail {
                input,
                is_spam: label.is_spam(),
                label: label.as_str(),
            }
        };
        Ok(serde_json::to_string(&verdict)?)
    }
}

fn looks_like_url(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.contains(char::is_whitespace)
        && Url::parse(trimmed).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

fn ensure_all_classified(total: usize, failures: usize) -> Result<()> {
    anyhow::ensure!(failures == 0, "{failures} of {total} inputs could not be classified");
    Ok(())
}
