//! Landing page listing the available routes

use axum::response::Html;

pub const HOME_PAGE: &str = "THIS IS THE HOME PAGE!
    <br/>
    <br/>
    <br/>Available Routes: 
    <br/>
    <br/>/api/v1.0/precipitation
    <br/>/api/v1.0/stations
    <br/>/api/v1.0/tobs
    <br/>
    <br/>For the routes below, replace the words in CAPS with the beginning and/or end dates in this format: yyyy-mm-dd
    <br/>/api/v1.0/START DATE
    <br/>/api/v1.0/START DATE/END DATE";

/// GET /
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}
