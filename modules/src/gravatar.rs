use async_trait::async_trait;
use holehe_common::capability::{Capability, Method};
use holehe_common::client::CheckClient;
use holehe_common::record::ResultRecord;
use reqwest::StatusCode;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::{Reply, send, unanswered};

/// Public profile lookup by address hash. A profile only exists for registered accounts.
pub struct Gravatar;

#[async_trait]
impl Capability for Gravatar {
    fn name(&self) -> &'static str {
        "gravatar"
    }

    fn domain(&self) -> &'static str {
        "gravatar.com"
    }

    fn method(&self) -> Method {
        Method::Other
    }

    async fn run(&self, email: &str, client: &CheckClient) -> anyhow::Result<ResultRecord> {
        let url: String = format!("https://gravatar.com/{}.json", profile_hash(email));
        let request = client.http().get(url);

        Ok(match send(client, request).await {
            Some(reply) => interpret(self.record(), &reply),
            None => unanswered(self.record()),
        })
    }
}

fn profile_hash(email: &str) -> String {
    hex::encode(Sha256::digest(email.trim().to_lowercase().as_bytes()))
}

fn interpret(record: ResultRecord, reply: &Reply) -> ResultRecord {
    match reply.status {
        StatusCode::OK => {
            let display_name: Option<String> = serde_json::from_str::<Value>(&reply.body)
                .ok()
                .and_then(|v| v["entry"][0]["displayName"].as_str().map(str::to_string));

            let record: ResultRecord = record.with_exists(true);
            match display_name {
                Some(name) => record.with_other("FullName", name),
                None => record,
            }
        }
        StatusCode::TOO_MANY_REQUESTS => record.rate_limited(),
        _ => record,
    }
}
