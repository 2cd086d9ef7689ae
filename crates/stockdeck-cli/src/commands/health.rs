use stockdeck_core::{BackendGateway, EnvelopeError, GatewayError, HealthStatus};

use crate::error::CliError;

use super::CommandResult;

pub async fn run<G>(gateway: &G) -> Result<CommandResult, CliError>
where
    G: BackendGateway + ?Sized,
{
    let health = gateway.health().await;
    let lines = vec![
        format!(
            "backend     : {}",
            if health.reachable { "reachable" } else { "unreachable" }
        ),
        format!(
            "status      : {}",
            health
                .status
                .map_or_else(|| String::from("-"), |status| status.to_string())
        ),
        format!("message     : {}", health.message),
        format!("latency_ms  : {}", health.latency_ms),
    ];

    let data = serde_json::to_value(&health)?;
    let mut result = CommandResult::ok("/", data, lines);
    if let Some(error) = unhealthy_error(&health) {
        result.errors.push(error);
    }
    Ok(result)
}

fn unhealthy_error(health: &HealthStatus) -> Option<EnvelopeError> {
    if health.reachable {
        return None;
    }

    let message = if health.message.trim().is_empty() {
        String::from("backend unreachable")
    } else {
        health.message.clone()
    };
    let error = match health.status {
        Some(status) => GatewayError::status(status, message),
        None => GatewayError::transport(message, true),
    };
    Some(EnvelopeError::from(&error))
}

#[cfg(test)]
mod tests {
    use stockdeck_core::{FixtureHttpClient, HttpError, HttpResponse};

    use super::*;
    use crate::commands::test_support::{gateway, BASE};

    #[tokio::test]
    async fn healthy_backend_has_no_errors() {
        let gateway = gateway(
            FixtureHttpClient::new().with_json(format!("{BASE}/"), r#""Server is running healthy""#),
        );

        let page = run(&gateway).await.expect("health page renders");

        assert!(page.errors.is_empty());
        assert_eq!(page.lines[0], "backend     : reachable");
        assert_eq!(page.data["status"], 200);
    }

    #[tokio::test]
    async fn refused_connection_is_a_retryable_transport_error() {
        let gateway = gateway(
            FixtureHttpClient::new()
                .with_error(format!("{BASE}/"), HttpError::new("connection refused")),
        );

        let page = run(&gateway).await.expect("health page renders");

        assert_eq!(page.lines[1], "status      : -");
        assert_eq!(page.errors[0].code, "gateway.transport");
        assert_eq!(page.errors[0].retryable, Some(true));
    }

    #[tokio::test]
    async fn error_status_keeps_the_code() {
        let gateway = gateway(
            FixtureHttpClient::new().with_response(format!("{BASE}/"), HttpResponse::new(502, "")),
        );

        let page = run(&gateway).await.expect("health page renders");

        assert_eq!(page.errors[0].code, "gateway.status");
        assert_eq!(page.errors[0].message, "backend unreachable");
    }
}
