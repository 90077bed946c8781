use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        api::{
            ballot::BallotSpec,
            proposal::{ProposalDescription, ProposalSpec},
            voter::VoterDescription,
        },
        auth::AuthToken,
        election::{ProposalId, SharedElection},
        identity::Identity,
        participant::Participant,
    },
};

pub fn routes() -> Vec<Route> {
    routes![add_proposal, get_proposal, get_voter, cast_vote]
}

#[post("/proposals", data = "<proposal>", format = "json")]
pub async fn add_proposal(
    token: AuthToken<Participant>,
    proposal: Json<ProposalSpec>,
    election: &State<SharedElection>,
) -> Result<Json<ProposalDescription>> {
    let mut election = election.write().await;
    let proposal_id = election.add_proposal(token.identity(), &proposal.description)?;
    let proposal = election.get_proposal(token.identity(), proposal_id)?.clone();
    Ok(Json(ProposalDescription::new(proposal_id, proposal)))
}

#[get("/proposals/<proposal_id>")]
pub async fn get_proposal(
    token: AuthToken<Participant>,
    proposal_id: ProposalId,
    election: &State<SharedElection>,
) -> Result<Json<ProposalDescription>> {
    let election = election.read().await;
    let proposal = election.get_proposal(token.identity(), proposal_id)?.clone();
    Ok(Json(ProposalDescription::new(proposal_id, proposal)))
}

#[get("/voters/<identity>")]
pub async fn get_voter(
    token: AuthToken<Participant>,
    identity: Identity,
    election: &State<SharedElection>,
) -> Result<Json<VoterDescription>> {
    let voter = election.read().await.get_voter(token.identity(), &identity)?;
    Ok(Json(VoterDescription { identity, voter }))
}

#[post("/votes", data = "<ballot>", format = "json")]
pub async fn cast_vote(
    token: AuthToken<Participant>,
    ballot: Json<BallotSpec>,
    election: &State<SharedElection>,
) -> Result<()> {
    election
        .write()
        .await
        .cast_vote(token.identity(), ballot.proposal_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rocket::{http::Status, local::asynchronous::Client};

    use crate::api::test_utils::*;
    use crate::model::{
        api::election::ElectionSummary,
        election::{Transition, GENESIS_DESCRIPTION},
    };

    use super::*;

    #[backend_test(admin)]
    async fn submit_and_read_proposals(client: Client) {
        register_expect_status(&client, Identity::voter_example1(), Status::Ok).await;
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Ok).await;

        login_participant(&client, Identity::voter_example1()).await;
        let response = post_json(&client, uri!(add_proposal), &ProposalSpec::example1()).await;
        let submitted: ProposalDescription = parse(response).await;
        assert_eq!(submitted.proposal_id, 1);
        assert_eq!(submitted.proposal.description, "Proposal X");
        assert_eq!(submitted.proposal.vote_count, 0);

        let genesis: ProposalDescription =
            parse(client.get(uri!(get_proposal(0))).dispatch().await).await;
        assert_eq!(genesis.proposal.description, GENESIS_DESCRIPTION);

        let fetched: ProposalDescription =
            parse(client.get(uri!(get_proposal(1))).dispatch().await).await;
        assert_eq!(fetched, submitted);

        let response = client.get(uri!(get_proposal(2))).dispatch().await;
        assert_eq!(Status::NotFound, response.status());
    }

    #[backend_test(admin)]
    async fn empty_proposal(client: Client) {
        register_expect_status(&client, Identity::voter_example1(), Status::Ok).await;
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Ok).await;

        login_participant(&client, Identity::voter_example1()).await;
        propose_expect_status(&client, &ProposalSpec::empty(), Status::BadRequest).await;
    }

    #[backend_test(admin)]
    async fn proposals_need_open_phase(client: Client) {
        register_expect_status(&client, Identity::voter_example1(), Status::Ok).await;

        login_participant(&client, Identity::voter_example1()).await;
        propose_expect_status(&client, &ProposalSpec::example1(), Status::Conflict).await;
    }

    #[backend_test(admin)]
    async fn outsiders_cannot_participate(client: Client) {
        register_expect_status(&client, Identity::voter_example1(), Status::Ok).await;
        advance_expect_status(&client, Transition::StartProposalsRegistration, Status::Ok).await;

        login_participant(&client, Identity::outsider_example()).await;
        propose_expect_status(&client, &ProposalSpec::example1(), Status::Forbidden).await;
        let response = client.get(uri!(get_proposal(0))).dispatch().await;
        assert_eq!(Status::Forbidden, response.status());
        let response = client
            .get(uri!(get_voter(Identity::voter_example1())))
            .dispatch()
            .await;
        assert_eq!(Status::Forbidden, response.status());
    }

    #[backend_test]
    async fn anonymous_cannot_participate(client: Client) {
        propose_expect_status(&client, &ProposalSpec::example1(), Status::Unauthorized).await;
        vote_expect_status(&client, 1, Status::Unauthorized).await;
    }

    #[backend_test]
    async fn voting(client: Client) {
        setup_voting(&client).await;

        login_participant(&client, Identity::voter_example1()).await;
        vote_expect_status(&client, 2, Status::Ok).await;

        // One vote each.
        vote_expect_status(&client, 1, Status::Conflict).await;

        let me: VoterDescription = parse(
            client
                .get(uri!(get_voter(Identity::voter_example1())))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(me.identity, Identity::voter_example1());
        assert!(me.voter.is_registered);
        assert!(me.voter.has_voted);
        assert_eq!(me.voter.voted_proposal_id, 2);

        let other: VoterDescription = parse(
            client
                .get(uri!(get_voter(Identity::outsider_example())))
                .dispatch()
                .await,
        )
        .await;
        assert!(!other.voter.is_registered);
        assert!(!other.voter.has_voted);

        let proposal: ProposalDescription =
            parse(client.get(uri!(get_proposal(2))).dispatch().await).await;
        assert_eq!(proposal.proposal.vote_count, 1);
    }

    #[backend_test]
    async fn invalid_ballots(client: Client) {
        setup_voting(&client).await;

        login_participant(&client, Identity::voter_example2()).await;
        vote_expect_status(&client, 0, Status::NotFound).await;
        vote_expect_status(&client, 3, Status::NotFound).await;

        // Rejected ballots do not use up the vote.
        vote_expect_status(&client, 1, Status::Ok).await;

        login_participant(&client, Identity::outsider_example()).await;
        vote_expect_status(&client, 1, Status::Forbidden).await;
    }

    #[backend_test]
    async fn full_election(client: Client) {
        setup_voting(&client).await;

        login_participant(&client, Identity::voter_example1()).await;
        vote_expect_status(&client, 2, Status::Ok).await;
        login_participant(&client, Identity::voter_example2()).await;
        vote_expect_status(&client, 2, Status::Ok).await;

        login_admin(&client).await;
        advance_expect_status(&client, Transition::EndVotingSession, Status::Ok).await;
        advance_expect_status(&client, Transition::TallyVotes, Status::Ok).await;

        let summary: ElectionSummary = parse(
            client
                .get(uri!(crate::api::public::status))
                .dispatch()
                .await,
        )
        .await;
        assert_eq!(summary.winning_proposal_id, 2);
        assert_eq!(summary.proposal_count, 3);

        // Voting is over.
        login_participant(&client, Identity::voter_example1()).await;
        vote_expect_status(&client, 1, Status::Conflict).await;
    }
}
