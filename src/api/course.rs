use rocket::{http::Status, serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        api::{
            auth::AuthToken,
            course::{CourseSpec, FeedbackSpec},
        },
        course::{Course, CourseId, Feedback},
        Ledger,
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        get_courses,
        get_course,
        add_course,
        close_course,
        submit_feedback,
        get_all_feedback,
        get_feedback,
    ]
}

#[get("/courses")]
async fn get_courses(ledger: &State<Ledger>) -> Json<Vec<Course>> {
    Json(ledger.read(|r| r.courses.courses().cloned().collect()))
}

#[get("/courses/<course_id>")]
async fn get_course(course_id: CourseId, ledger: &State<Ledger>) -> Result<Json<Course>> {
    let course = ledger.read(|r| r.courses.course(course_id).cloned())?;
    Ok(Json(course))
}

#[post("/courses", data = "<spec>", format = "json")]
async fn add_course(
    token: AuthToken,
    spec: Json<CourseSpec>,
    ledger: &State<Ledger>,
) -> Result<Json<Course>> {
    let course = ledger.write(|r| {
        let course_id =
            r.courses
                .add_course(&token.identity, &spec.course_code, &spec.session, spec.year)?;
        r.courses.course(course_id).cloned()
    })?;
    Ok(Json(course))
}

#[post("/courses/<course_id>/close")]
async fn close_course(token: AuthToken, course_id: CourseId, ledger: &State<Ledger>) -> Result<()> {
    ledger.write(|r| r.courses.close_course_for_feedback(&token.identity, course_id))?;
    Ok(())
}

/// Responds with the position of the new feedback in submission order.
#[post("/courses/<course_id>/feedback", data = "<spec>", format = "json")]
async fn submit_feedback(
    token: AuthToken,
    course_id: CourseId,
    spec: Json<FeedbackSpec>,
    ledger: &State<Ledger>,
) -> Result<(Status, Json<usize>)> {
    let index = ledger.write(|r| {
        r.courses
            .submit_feedback(&token.identity, course_id, &spec.content, spec.rating)
    })?;
    Ok((Status::Created, Json(index)))
}

#[get("/courses/<course_id>/feedback")]
async fn get_all_feedback(
    token: AuthToken,
    course_id: CourseId,
    ledger: &State<Ledger>,
) -> Result<Json<Vec<Feedback>>> {
    let feedback = ledger.read(|r| {
        r.courses
            .all_feedback(&token.identity, course_id)
            .map(|all| all.to_vec())
    })?;
    Ok(Json(feedback))
}

#[get("/courses/<course_id>/feedback/<index>")]
async fn get_feedback(
    token: AuthToken,
    course_id: CourseId,
    index: usize,
    ledger: &State<Ledger>,
) -> Result<Json<Feedback>> {
    let feedback = ledger.read(|r| r.courses.feedback(&token.identity, course_id, index).cloned())?;
    Ok(Json(feedback))
}
