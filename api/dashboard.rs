use serde_json::json;
use vercel_runtime::{run, Body, Error, Request, Response, StatusCode};

use retail_forecast_demo::generator::Clock;
use retail_forecast_demo::models::history::Decision;
use retail_forecast_demo::models::report::DashboardRequest;
use retail_forecast_demo::models::series::Granularity;
use retail_forecast_demo::models::store::Scope;
use retail_forecast_demo::session::DashboardSession;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    run(handler).await
}

/// POST /api/dashboard — render one dashboard snapshot.
///
/// Each request is a full one-shot render: a fresh session with the
/// seeded decision history, the request's adjustments and optional
/// decision applied, and every derived table and KPI serialized back.
/// No state crosses requests.
pub async fn handler(req: Request) -> Result<Response<Body>, Error> {
    if *req.method() != http::Method::POST {
        let error = json!({
            "error": "Method not allowed",
            "message": "Use POST to render a dashboard snapshot"
        });
        return Ok(Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header("Content-Type", "application/json")
            .body(Body::Text(error.to_string()))?);
    }

    let request: DashboardRequest = match req.body() {
        Body::Text(text) if !text.is_empty() => match serde_json::from_str(text) {
            Ok(parsed) => parsed,
            Err(err) => return bad_request(&format!("invalid request body: {err}")),
        },
        Body::Binary(bytes) if !bytes.is_empty() => match serde_json::from_slice(bytes) {
            Ok(parsed) => parsed,
            Err(err) => return bad_request(&format!("invalid request body: {err}")),
        },
        _ => DashboardRequest::default(),
    };

    let clock = Clock::now();
    let scope = Scope::parse(request.scope.as_deref().unwrap_or("ALL"));
    let reference_date = request.reference_date.unwrap_or(clock.today);
    let granularity = match request.granularity.as_deref() {
        None | Some("hourly") => Granularity::Hourly,
        Some("daily") => Granularity::Daily,
        Some(other) => return bad_request(&format!("unknown granularity '{other}'")),
    };

    let mut session = DashboardSession::new(clock.today);
    session.set_granularity(granularity);

    if let Some(adjustments) = request.adjustments {
        for (store, entries) in adjustments {
            for (label, percent) in entries {
                if let Err(err) = session.set_adjustment(&store, &label, percent) {
                    return bad_request(&err.to_string());
                }
            }
        }
    }

    if let Some(action) = request.decision {
        let decision = if action.followed_ai {
            Decision::FollowedAi
        } else {
            Decision::UsedLegacy
        };
        session.record_decision(&action.store, decision, clock.today);
    }

    match session.render(&scope, reference_date, &clock) {
        Ok(snapshot) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Body::Text(serde_json::to_string(&snapshot)?))?),
        Err(err) => {
            let payload = json!({ "error": "render failed", "message": err.to_string() });
            Ok(Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Body::Text(payload.to_string()))?)
        }
    }
}

fn bad_request(message: &str) -> Result<Response<Body>, Error> {
    let payload = json!({ "error": "bad request", "message": message });
    Ok(Response::builder()
        .status(StatusCode::BAD_REQUEST)
        .header("Content-Type", "application/json")
        .body(Body::Text(payload.to_string()))?)
}
