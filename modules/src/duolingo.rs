use async_trait::async_trait;
use holehe_common::capability::{Capability, Method};
use holehe_common::client::CheckClient;
use holehe_common::record::ResultRecord;
use serde_json::Value;

use crate::{Reply, send, unanswered};

const USERS_URL: &str = "https://www.duolingo.com/2017-06-30/users";

/// User search by email on the public API.
pub struct Duolingo;

#[async_trait]
impl Capability for Duolingo {
    fn name(&self) -> &'static str {
        "duolingo"
    }

    fn domain(&self) -> &'static str {
        "duolingo.com"
    }

    fn method(&self) -> Method {
        Method::Other
    }

    async fn run(&self, email: &str, client: &CheckClient) -> anyhow::Result<ResultRecord> {
        let request = client.http().get(USERS_URL).query(&[("email", email)]);

        Ok(match send(client, request).await {
            Some(reply) => interpret(self.record(), &reply),
            None => unanswered(self.record()),
        })
    }
}

fn interpret(record: ResultRecord, reply: &Reply) -> ResultRecord {
    let users: Option<usize> = serde_json::from_str::<Value>(&reply.body)
        .ok()
        .and_then(|v| v.get("users").and_then(Value::as_array).map(Vec::len));

    match users {
        Some(0) => record,
        Some(_) => record.with_exists(true),
        None => record.rate_limited(),
    }
}
