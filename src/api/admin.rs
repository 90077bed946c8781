use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        admin::Admin,
        api::{election::ElectionSummary, voter::VoterRegistration},
        auth::AuthToken,
        election::{SharedElection, Transition},
    },
};

pub fn routes() -> Vec<Route> {
    routes![register_voter, advance_workflow]
}

#[post("/admin/voters", data = "<registration>", format = "json")]
pub async fn register_voter(
    token: AuthToken<Admin>,
    registration: Json<VoterRegistration>,
    election: &State<SharedElection>,
) -> Result<()> {
    election
        .write()
        .await
        .register_voter(token.identity(), registration.0.identity)?;
    Ok(())
}

#[post("/admin/workflow/<step>")]
pub async fn advance_workflow(
    token: AuthToken<Admin>,
    step: Transition,
    election: &State<SharedElection>,
) -> Result<Json<ElectionSummary>> {
    let mut election = election.write().await;
    election.advance(token.identity(), step)?;
    Ok(Json((&*election).into()))
}

#[cfg(test)]
mod tests {
    use rocket::{http::Status, local::asynchronous::Client, serde::json::json};

    use crate::api::test_utils::*;
    use crate::model::{election::WorkflowStatus, identity::Identity};

    use super::*;

    #[backend_test(admin)]
    async fn register_voters(client: Client) {
        register_expect_status(&client, Identity::voter_example1(), Status::Ok).await;
        register_expect_status(&client, Identity::voter_example2(), Status::Ok).await;

        // Second registration is refused.
        register_expect_status(&client, Identity::voter_example1(), Status::Conflict).await;

        let summary: ElectionSummary =
            parse(client.get(uri!(crate::api::public::status)).dispatch().await).await;
        assert_eq!(summary.voter_count, 2);
    }

    #[backend_test(admin)]
    async fn blank_voters_refused(client: Client) {
        for blank in ["", "   "] {
            let response = post_json(
                &client,
                uri!(register_voter),
                &json!({ "identity": blank }),
            )
            .await;
            assert_eq!(Status::UnprocessableEntity, response.status());
        }

        let summary: ElectionSummary =
            parse(client.get(uri!(crate::api::public::status)).dispatch().await).await;
        assert_eq!(summary.voter_count, 0);
    }

    #[backend_test(admin)]
    async fn workflow_in_order(client: Client) {
        let mut expected = WorkflowStatus::RegisteringVoters;
        for step in Transition::ALL {
            let response = client
                .post(uri!(advance_workflow(step)))
                .dispatch()
                .await;
            let summary: ElectionSummary = parse(response).await;
            assert_eq!(summary.status, step.target());
            assert!(summary.status > expected);
            expected = summary.status;

            // Repeating the step is refused.
            advance_expect_status(&client, step, Status::Conflict).await;
        }
        assert_eq!(expected, WorkflowStatus::VotesTallied);
    }

    #[backend_test(admin)]
    async fn workflow_out_of_order(client: Client) {
        advance_expect_status(&client, Transition::StartVotingSession, Status::Conflict).await;
        advance_expect_status(&client, Transition::TallyVotes, Status::Conflict).await;

        let summary: ElectionSummary =
            parse(client.get(uri!(crate::api::public::status)).dispatch().await).await;
        assert_eq!(summary.status, WorkflowStatus::RegisteringVoters);
    }

    #[backend_test(admin)]
    async fn registration_closes(client: Client) {
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Ok).await;
        register_expect_status(&client, Identity::voter_example1(), Status::Conflict).await;
    }

    #[backend_test(participant)]
    async fn participants_cannot_administer(client: Client) {
        register_expect_status(&client, Identity::voter_example2(), Status::Forbidden).await;
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Forbidden)
            .await;
    }

    #[backend_test]
    async fn anonymous_cannot_administer(client: Client) {
        register_expect_status(&client, Identity::voter_example2(), Status::Unauthorized).await;
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Unauthorized)
            .await;
    }

    #[backend_test(admin)]
    async fn unknown_step(client: Client) {
        let response = client.post("/admin/workflow/restart").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
    }
}
