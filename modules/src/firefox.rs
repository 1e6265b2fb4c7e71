use async_trait::async_trait;
use holehe_common::capability::{Capability, Method};
use holehe_common::client::CheckClient;
use holehe_common::record::ResultRecord;

use crate::{Reply, send, unanswered};

const STATUS_URL: &str = "https://api.accounts.firefox.com/v1/account/status";

/// Account status endpoint used by the sign-up form.
pub struct Firefox;

#[async_trait]
impl Capability for Firefox {
    fn name(&self) -> &'static str {
        "firefox"
    }

    fn domain(&self) -> &'static str {
        "firefox.com"
    }

    fn method(&self) -> Method {
        Method::Register
    }

    async fn run(&self, email: &str, client: &CheckClient) -> anyhow::Result<ResultRecord> {
        let request = client.http().post(STATUS_URL).form(&[("email", email)]);

        Ok(match send(client, request).await {
            Some(reply) => interpret(self.record(), &reply),
            None => unanswered(self.record()),
        })
    }
}

// Body is `{"exists":true}` or `{"exists":false}`; anything else is an error page.
fn interpret(record: ResultRecord, reply: &Reply) -> ResultRecord {
    if reply.body.contains("false") {
        record
    } else if reply.body.contains("true") {
        record.with_exists(true)
    } else {
        record.rate_limited()
    }
}
