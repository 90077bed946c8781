use std::sync::Arc;

use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::election::{ElectionResults, ElectionSummary},
        election::{EventLog, LoggedEvent, ProposalId, SharedElection, WorkflowStatus},
    },
};

pub fn routes() -> Vec<Route> {
    routes![status, winner, events, results]
}

#[get("/status")]
pub async fn status(election: &State<SharedElection>) -> Json<ElectionSummary> {
    Json((&*election.read().await).into())
}

/// The winning proposal ID, 0 until the votes are tallied.
#[get("/winner")]
pub async fn winner(election: &State<SharedElection>) -> Json<ProposalId> {
    Json(election.read().await.winning_proposal_id())
}

#[get("/events")]
pub fn events(event_log: &State<Arc<EventLog>>) -> Json<Vec<LoggedEvent>> {
    Json(event_log.entries())
}

#[get("/results")]
pub async fn results(election: &State<SharedElection>) -> Result<Json<ElectionResults>> {
    let election = election.read().await;
    if election.status() != WorkflowStatus::VotesTallied {
        return Err(Error::Status(
            Status::Conflict,
            format!(
                "Results are published once the votes are tallied (election is {})",
                election.status()
            ),
        ));
    }
    Ok(Json((&*election).into()))
}

#[cfg(test)]
mod tests {
    use rocket::local::asynchronous::Client;

    use crate::api::test_utils::*;
    use crate::model::{
        election::{ElectionEvent, Transition},
        identity::Identity,
    };

    use super::*;

    #[backend_test]
    async fn fresh_election(client: Client) {
        let summary: ElectionSummary = parse(client.get(uri!(status)).dispatch().await).await;
        assert_eq!(summary.administrator, Identity::admin_example());
        assert_eq!(summary.status, WorkflowStatus::RegisteringVoters);
        assert_eq!(summary.voter_count, 0);
        assert_eq!(summary.proposal_count, 0);
        assert_eq!(summary.winning_proposal_id, 0);

        let winner: ProposalId = parse(client.get(uri!(winner)).dispatch().await).await;
        assert_eq!(winner, 0);

        let events: Vec<LoggedEvent> = parse(client.get(uri!(events)).dispatch().await).await;
        assert!(events.is_empty());

        let response = client.get(uri!(results)).dispatch().await;
        assert_eq!(Status::Conflict, response.status());
    }

    #[backend_test]
    async fn event_history(client: Client) {
        setup_voting(&client).await;

        let events: Vec<ElectionEvent> = parse::<Vec<LoggedEvent>>(
            client.get(uri!(events)).dispatch().await,
        )
        .await
        .into_iter()
        .map(|entry| entry.event)
        .collect();

        assert_eq!(
            events,
            vec![
                ElectionEvent::VoterRegistered {
                    identity: Identity::voter_example1()
                },
                ElectionEvent::VoterRegistered {
                    identity: Identity::voter_example2()
                },
                ElectionEvent::WorkflowStatusChanged {
                    previous: WorkflowStatus::RegisteringVoters,
                    next: WorkflowStatus::ProposalsRegistrationStarted,
                },
                ElectionEvent::ProposalRegistered { proposal_id: 1 },
                ElectionEvent::ProposalRegistered { proposal_id: 2 },
                ElectionEvent::WorkflowStatusChanged {
                    previous: WorkflowStatus::ProposalsRegistrationStarted,
                    next: WorkflowStatus::ProposalsRegistrationEnded,
                },
                ElectionEvent::WorkflowStatusChanged {
                    previous: WorkflowStatus::ProposalsRegistrationEnded,
                    next: WorkflowStatus::VotingSessionStarted,
                },
            ]
        );
    }

    #[backend_test]
    async fn published_results(client: Client) {
        setup_voting(&client).await;

        login_participant(&client, Identity::voter_example1()).await;
        vote_expect_status(&client, 1, Status::Ok).await;
        login_participant(&client, Identity::voter_example2()).await;
        vote_expect_status(&client, 2, Status::Ok).await;

        // Nothing is published before the tally.
        let response = client.get(uri!(results)).dispatch().await;
        assert_eq!(Status::Conflict, response.status());

        login_admin(&client).await;
        advance_expect_status(&client, Transition::EndVotingSession, Status::Ok).await;
        advance_expect_status(&client, Transition::TallyVotes, Status::Ok).await;

        // A tie goes to the earlier proposal.
        let winner: ProposalId = parse(client.get(uri!(winner)).dispatch().await).await;
        assert_eq!(winner, 1);

        let results: ElectionResults = parse(client.get(uri!(results)).dispatch().await).await;
        assert_eq!(results.status, WorkflowStatus::VotesTallied);
        assert_eq!(results.winning_proposal_id, 1);
        assert_eq!(results.ballots.len(), 2);
        assert_eq!(results.ballots[&Identity::voter_example2()], 2);
        assert_eq!(results.verify(), Ok(()));
    }
}
