//! AWS Lambda handler for running plan simulations
//!
//! Accepts a plan description as JSON and returns the simulation response.
//! Works both for direct invocation (the event is the plan) and for Lambda
//! Function URLs (the plan is the string `body` of the event).

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use savings_plan::{run_simulation, PlanInput, SimulationResponse};
use serde_json::{json, Value};

/// Extract the plan from a raw event or a Function URL event
fn parse_plan(event: Value) -> Result<PlanInput, String> {
    let body = event.get("body").cloned();
    let payload = match body {
        Some(Value::String(body)) => {
            serde_json::from_str(&body).map_err(|e| format!("Invalid JSON: {}", e))?
        }
        Some(Value::Null) => json!({}),
        _ => event,
    };
    serde_json::from_value(payload).map_err(|e| format!("Invalid plan: {}", e))
}

fn http_response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body,
    })
}

/// Lambda handler function
async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let (payload, _context) = event.into_parts();

    // Handle CORS preflight
    let method = payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .map(str::to_owned);
    if method.as_deref() == Some("OPTIONS") {
        return Ok(http_response(200, String::new()));
    }

    let plan = match parse_plan(payload) {
        Ok(plan) => plan,
        Err(message) => {
            let body = serde_json::to_string(&json!({ "ok": false, "errors": [message] }))?;
            return Ok(http_response(400, body));
        }
    };

    let response = SimulationResponse::from(run_simulation(&plan));
    info!(
        "simulation ok={} in {} ms",
        response.ok,
        start.elapsed().as_millis()
    );

    let status = if response.ok { 200 } else { 422 };
    Ok(http_response(status, serde_json::to_string(&response)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
