use super::*;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use shared::domain::FrameType;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct AgentState {
    received: Arc<Mutex<Vec<TimeShiftRequest>>>,
    status: StatusCode,
    reply: TimeShiftResponse,
    delay: Duration,
}

impl AgentState {
    fn replying(status: StatusCode, ok: bool, msg: &str) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            status,
            reply: TimeShiftResponse {
                ok,
                msg: msg.to_string(),
            },
            delay: Duration::ZERO,
        }
    }
}

async fn handle_time_shift(
    State(state): State<AgentState>,
    Json(body): Json<TimeShiftRequest>,
) -> (StatusCode, Json<TimeShiftResponse>) {
    state.received.lock().await.push(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.reply.clone()))
}

async fn spawn_agent_server(state: AgentState) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route(TIME_SHIFT_PATH, post(handle_time_shift))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn sample_request() -> ShiftRequest {
    ShiftRequest {
        frame_type: FrameType::Control,
        interval: (120, 240),
        displacement: -15,
    }
}

#[tokio::test]
async fn posts_snapshot_and_maps_success() {
    let state = AgentState::replying(StatusCode::OK, true, "");
    let url = spawn_agent_server(state.clone()).await.expect("spawn agent");
    let agent = HttpShiftAgent::new(&format!("{url}/"), Duration::from_secs(5)).expect("agent");

    let outcome = agent.shift(sample_request()).await.expect("shift");

    assert_eq!(outcome, ShiftOutcome::Applied);
    let received = state.received.lock().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].frame_type, FrameType::Control);
    assert_eq!((received[0].start, received[0].end), (120, 240));
    assert_eq!(received[0].displacement, -15);
}

#[tokio::test]
async fn refusal_is_an_outcome_not_an_error() {
    let state = AgentState::replying(StatusCode::OK, false, "out of range");
    let url = spawn_agent_server(state).await.expect("spawn agent");
    let agent = HttpShiftAgent::new(&url, Duration::from_secs(5)).expect("agent");

    let outcome = agent.shift(sample_request()).await.expect("shift");

    assert_eq!(outcome, ShiftOutcome::Failed("out of range".into()));
}

#[tokio::test]
async fn error_status_is_a_transport_fault() {
    let state = AgentState::replying(StatusCode::INTERNAL_SERVER_ERROR, false, "boom");
    let url = spawn_agent_server(state).await.expect("spawn agent");
    let agent = HttpShiftAgent::new(&url, Duration::from_secs(5)).expect("agent");

    let err = agent
        .shift(sample_request())
        .await
        .expect_err("status 500");

    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn slow_agent_hits_client_timeout() {
    let mut state = AgentState::replying(StatusCode::OK, true, "");
    state.delay = Duration::from_millis(500);
    let url = spawn_agent_server(state).await.expect("spawn agent");
    let agent = HttpShiftAgent::new(&url, Duration::from_millis(50)).expect("agent");

    let err = agent.shift(sample_request()).await.expect_err("timeout");

    assert!(format!("{err:#}").contains("did not reach the agent"));
}

#[tokio::test]
async fn unreachable_agent_is_a_transport_fault() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let agent = HttpShiftAgent::new(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("agent");

    assert!(agent.shift(sample_request()).await.is_err());
}

#[test]
fn rejects_malformed_agent_url() {
    assert!(HttpShiftAgent::new("not a url", Duration::from_secs(1)).is_err());

    let agent =
        HttpShiftAgent::new("http://127.0.0.1:9000/", Duration::from_secs(1)).expect("agent");
    assert_eq!(
        agent.endpoint().as_str(),
        "http://127.0.0.1:9000/api/time-shift"
    );
}
