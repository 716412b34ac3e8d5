use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        api::{
            auth::AuthToken,
            election::{BallotSpec, CandidateSpec, ElectionResults, ElectionSpec, VoterRegistration},
        },
        common::Identity,
        election::{Candidate, CandidateId, Election, ElectionId, Voter},
        Ledger,
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        get_admin,
        get_elections,
        get_election,
        create_election,
        activate_election,
        deactivate_election,
        get_candidates,
        get_total_candidates,
        get_candidate,
        add_candidate,
        register_voter,
        get_voters,
        get_voter,
        has_voted,
        verify_voter,
        vote,
        get_results,
    ]
}

#[get("/admin")]
async fn get_admin(ledger: &State<Ledger>) -> Json<Identity> {
    Json(ledger.administrator().clone())
}

#[get("/elections?<active>")]
async fn get_elections(active: Option<bool>, ledger: &State<Ledger>) -> Json<Vec<Election>> {
    let elections = ledger.read(|r| {
        if active.unwrap_or(false) {
            r.elections.active_elections().cloned().collect()
        } else {
            r.elections.elections().cloned().collect()
        }
    });
    Json(elections)
}

#[get("/elections/<election_id>")]
async fn get_election(election_id: ElectionId, ledger: &State<Ledger>) -> Result<Json<Election>> {
    let election = ledger.read(|r| r.elections.election(election_id).cloned())?;
    Ok(Json(election))
}

#[post("/elections", data = "<spec>", format = "json")]
async fn create_election(
    token: AuthToken,
    spec: Json<ElectionSpec>,
    ledger: &State<Ledger>,
) -> Result<Json<Election>> {
    let election = ledger.write(|r| {
        let election_id = r.elections.create_election(&token.identity, &spec.title)?;
        r.elections.election(election_id).cloned()
    })?;
    Ok(Json(election))
}

#[post("/elections/<election_id>/activate")]
async fn activate_election(
    token: AuthToken,
    election_id: ElectionId,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.write(|r| r.elections.activate(&token.identity, election_id))?;
    Ok(())
}

#[post("/elections/<election_id>/deactivate")]
async fn deactivate_election(
    token: AuthToken,
    election_id: ElectionId,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.write(|r| r.elections.deactivate(&token.identity, election_id))?;
    Ok(())
}

#[get("/elections/<election_id>/candidates")]
async fn get_candidates(
    election_id: ElectionId,
    ledger: &State<Ledger>,
) -> Result<Json<Vec<Candidate>>> {
    let candidates = ledger.read(|r| r.elections.candidates(election_id).map(|all| all.to_vec()))?;
    Ok(Json(candidates))
}

#[get("/elections/<election_id>/candidates/count")]
async fn get_total_candidates(election_id: ElectionId, ledger: &State<Ledger>) -> Result<Json<usize>> {
    let total = ledger.read(|r| r.elections.total_candidates(election_id))?;
    Ok(Json(total))
}

// Ranked below `/count`, which would otherwise collide.
#[get("/elections/<election_id>/candidates/<candidate_id>", rank = 2)]
async fn get_candidate(
    election_id: ElectionId,
    candidate_id: CandidateId,
    ledger: &State<Ledger>,
) -> Result<Json<Candidate>> {
    let candidate = ledger.read(|r| r.elections.candidate(election_id, candidate_id).cloned())?;
    Ok(Json(candidate))
}

#[post("/elections/<election_id>/candidates", data = "<spec>", format = "json")]
async fn add_candidate(
    token: AuthToken,
    election_id: ElectionId,
    spec: Json<CandidateSpec>,
    ledger: &State<Ledger>,
) -> Result<Json<Candidate>> {
    let candidate = ledger.write(|r| {
        let candidate_id =
            r.elections
                .add_candidate(&token.identity, election_id, &spec.header, &spec.slogan)?;
        r.elections.candidate(election_id, candidate_id).cloned()
    })?;
    Ok(Json(candidate))
}

#[post("/elections/<election_id>/voters", data = "<registration>", format = "json")]
async fn register_voter(
    token: AuthToken,
    election_id: ElectionId,
    registration: Json<VoterRegistration>,
    ledger: &State<Ledger>,
) -> Result<Json<Voter>> {
    let voter = ledger.write(|r| {
        r.elections.register_voter(
            &token.identity,
            election_id,
            &registration.name,
            &registration.email,
        )
    })?;
    Ok(Json(voter))
}

#[get("/elections/<election_id>/voters")]
async fn get_voters(election_id: ElectionId, ledger: &State<Ledger>) -> Result<Json<Vec<Voter>>> {
    let voters = ledger.read(|r| r.elections.voters(election_id).map(|all| all.to_vec()))?;
    Ok(Json(voters))
}

#[get("/elections/<election_id>/voters/<identity>")]
async fn get_voter(
    election_id: ElectionId,
    identity: Identity,
    ledger: &State<Ledger>,
) -> Result<Json<Voter>> {
    let voter = ledger.read(|r| r.elections.voter(election_id, &identity).cloned())?;
    Ok(Json(voter))
}

#[get("/elections/<election_id>/voters/<identity>/voted")]
async fn has_voted(
    election_id: ElectionId,
    identity: Identity,
    ledger: &State<Ledger>,
) -> Result<Json<bool>> {
    let voted = ledger.read(|r| r.elections.has_voted(election_id, &identity))?;
    Ok(Json(voted))
}

#[post("/elections/<election_id>/voters/<identity>/verify")]
async fn verify_voter(
    token: AuthToken,
    election_id: ElectionId,
    identity: Identity,
    ledger: &State<Ledger>,
) -> Result<()> {
    ledger.write(|r| r.elections.verify_voter(&token.identity, election_id, &identity))?;
    Ok(())
}

#[post("/elections/<election_id>/votes", data = "<ballot>", format = "json")]
async fn vote(
    token: AuthToken,
    election_id: ElectionId,
    ballot: Json<BallotSpec>,
    ledger: &State<Ledger>,
) -> Result<Status> {
    ledger.write(|r| r.elections.vote(&token.identity, election_id, ballot.candidate))?;
    Ok(Status::Created)
}

#[get("/elections/<election_id>/results")]
async fn get_results(
    election_id: ElectionId,
    ledger: &State<Ledger>,
) -> Result<Json<ElectionResults>> {
    let results = ledger.read(|r| {
        let election = r.elections.election(election_id)?;
        r.elections
            .candidates(election_id)
            .map(|candidates| ElectionResults::tally(election, candidates))
    })?;
    Ok(Json(results))
}
