use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{error, info, warn};
use rocket::{
    fairing::{Fairing, Info, Kind},
    http::StatusClass,
    Data, Orbit, Request, Response, Rocket,
};

use crate::model::election::{ElectionEvent, ElectionObserver, SharedElection};

/// A unique identifier for a particular request, pairing its request and
/// response log lines.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct RequestId(pub usize);

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl RequestId {
    /// Atomically get the next ID. This wraps around back to zero if you somehow exceed a usize.
    pub fn next() -> RequestId {
        static REQUEST_ID_COUNTER: AtomicUsize = AtomicUsize::new(0);
        RequestId(REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A rocket fairing that does global logging: every request and response,
/// tagged with the election phase, plus the election's state at launch and
/// shutdown.
#[derive(Debug, Copy, Clone)]
pub struct LoggerFairing;

#[rocket::async_trait]
impl Fairing for LoggerFairing {
    fn info(&self) -> Info {
        Info {
            name: "Logger",
            kind: Kind::Liftoff | Kind::Request | Kind::Response | Kind::Shutdown,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let protocol = if rocket.config().tls_enabled() {
            "https"
        } else {
            "http"
        };
        let ip = &rocket.config().address;
        let port = &rocket.config().port;
        info!("Server launched on {protocol}://{ip}:{port}");
        if let Some(election) = rocket.state::<SharedElection>() {
            info!("Serving {:?}", *election.read().await);
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let id = req.local_cache(RequestId::next);
        info!("->req{id} {} {}", req.method(), req.uri());
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let id = req.local_cache(RequestId::next);
        let code = res.status();
        let route = match req.route() {
            Some(r) => match r.name {
                Some(ref name) => format!("{name} ({})", r.uri),
                None => r.uri.to_string(),
            },
            None => "no matching route".to_string(),
        };
        // Phase after the request, so workflow steps show where they landed.
        let phase = match req.rocket().state::<SharedElection>() {
            Some(election) => election.read().await.status().to_string(),
            None => "no election".to_string(),
        };
        let log_msg = format!("<-rsp{id} {code} {route} [{phase}]");
        match code.class() {
            StatusClass::ServerError => error!("{log_msg}"),
            StatusClass::ClientError => warn!("{log_msg}"),
            _ => info!("{log_msg}"),
        }
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        warn!("Shutdown requested, stopping gracefully...");
        if let Some(election) = rocket.state::<SharedElection>() {
            let election = election.read().await;
            warn!(
                "Election state is lost on shutdown: {} with {} voters and {} proposals",
                election.status(),
                election.voter_count(),
                election.proposals().len()
            );
        }
    }
}

/// An election observer that writes every notification to the log.
#[derive(Debug, Copy, Clone)]
pub struct ElectionEventLogger;

impl ElectionObserver for ElectionEventLogger {
    fn notify(&self, event: &ElectionEvent) {
        match event {
            ElectionEvent::WorkflowStatusChanged { previous, next } => {
                info!("Election moved from '{previous}' to '{next}'")
            }
            ElectionEvent::VoterRegistered { identity } => {
                info!("Voter {identity} registered")
            }
            ElectionEvent::ProposalRegistered { proposal_id } => {
                info!("Proposal {proposal_id} registered")
            }
            ElectionEvent::VoteCast { voter, proposal_id } => {
                info!("Voter {voter} voted for proposal {proposal_id}")
            }
        }
    }
}
