//! End-to-end planner tests against mocked upstream services.
//!
//! One mock server stands in for all three upstream APIs: the
//! geocoding search, the weather forecast, and the points-of-interest
//! interpreter each get their own path on it.

use std::sync::Arc;

use mockito::{Matcher, Mock, Server, ServerGuard};
use tripscout::config::TripScoutConfig;
use tripscout::{AttractionsAgent, Resolver, TripPlanner, TripRequest, WeatherAgent};

const PARIS_GEOCODE_BODY: &str =
    r#"[{"lat": "48.8566", "lon": "2.3522", "display_name": "Paris, Île-de-France, France"}]"#;

fn planner_for(server: &ServerGuard) -> TripPlanner {
    let url = server.url();
    let mut config = TripScoutConfig::default();
    config.geocoding.api_key = Some("test-key".to_string());
    config.geocoding.base_url = url.clone();
    config.weather.base_url = url.clone();
    config.attractions.base_url = url;

    let resolver = Arc::new(Resolver::new(&config).unwrap());
    let weather = WeatherAgent::new(Arc::clone(&resolver), &config).unwrap();
    let attractions = AttractionsAgent::new(resolver, &config).unwrap();
    TripPlanner::new(weather, attractions)
}

async fn mock_geocode(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_weather(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("GET", "/forecast")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_attractions(server: &mut ServerGuard, body: &str) -> Mock {
    server
        .mock("POST", "/interpreter")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn blank_place_returns_prompt_without_network_calls() {
    let mut server = Server::new_async().await;
    let get_mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let post_mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let planner = planner_for(&server);

    for place in ["", "   ", "\t\n"] {
        let reply = planner.plan_trip(&TripRequest::new(place, true, true)).await;
        assert_eq!(reply, "Please enter a place you want to visit.");
    }

    get_mock.assert_async().await;
    post_mock.assert_async().await;
}

#[tokio::test]
async fn weather_only_returns_unjoined_weather_sentence() {
    let mut server = Server::new_async().await;
    let geocode = mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    let weather = mock_weather(
        &mut server,
        r#"{"current_weather": {"temperature": 21.5},
            "hourly": {"precipitation_probability": [10, 40, 15]}}"#,
    )
    .await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", true, false))
        .await;

    assert_eq!(
        reply,
        "In paris it's currently 21.5°C with a chance of 40% to rain."
    );
    assert!(!reply.contains(" And "));
    geocode.assert_async().await;
    weather.assert_async().await;
}

#[tokio::test]
async fn weather_without_rain_data_omits_rain_clause() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    mock_weather(&mut server, r#"{"current_weather": {"temperature": 21.5}}"#).await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", true, false))
        .await;

    assert_eq!(reply, "In paris it's currently 21.5°C.");
}

#[tokio::test]
async fn missing_temperature_reports_fetch_failure() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    mock_weather(&mut server, r#"{"hourly": {"precipitation_probability": [5]}}"#).await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", true, false))
        .await;

    assert_eq!(reply, "I couldn't fetch weather for paris right now.");
}

#[tokio::test]
async fn unresolved_place_gets_unknown_place_reply() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, "[]").await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", true, false))
        .await;

    assert_eq!(reply, "I don't know this place exists.");
}

#[tokio::test]
async fn attractions_deduplicate_and_cap_results() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    mock_attractions(
        &mut server,
        r#"{"elements": [
            {"tags": {"name": "Louvre"}},
            {"tags": {"name": "Eiffel Tower"}},
            {"tags": {"name": "Louvre"}},
            {"tags": {"name": "Notre-Dame"}},
            {"tags": {}},
            {"tags": {"name": "Sacré-Cœur"}},
            {"tags": {"name": "Panthéon"}},
            {"tags": {"name": "Musée d'Orsay"}}
        ]}"#,
    )
    .await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", false, true))
        .await;

    assert_eq!(
        reply,
        "In paris these are the places you can go,\nLouvre\nEiffel Tower\nNotre-Dame\nSacré-Cœur\nPanthéon"
    );
    assert_eq!(reply.matches("Louvre").count(), 1);
}

#[tokio::test]
async fn empty_attraction_elements_distinct_from_fetch_failure() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    mock_attractions(&mut server, r#"{"elements": []}"#).await;
    let planner = planner_for(&server);

    let empty_reply = planner
        .plan_trip(&TripRequest::new("paris", false, true))
        .await;
    assert_eq!(
        empty_reply,
        "In paris I couldn't find popular tourist attractions from the API."
    );

    // Same planner, but the interpreter now fails at transport level
    let mut failing = Server::new_async().await;
    mock_geocode(&mut failing, PARIS_GEOCODE_BODY).await;
    failing
        .mock("POST", "/interpreter")
        .with_status(500)
        .create_async()
        .await;
    let planner = planner_for(&failing);

    let failure_reply = planner
        .plan_trip(&TripRequest::new("paris", false, true))
        .await;
    assert_eq!(
        failure_reply,
        "I couldn't fetch tourist places for paris right now."
    );
    assert_ne!(empty_reply, failure_reply);
}

#[tokio::test]
async fn both_lookups_join_with_and_in_fixed_order() {
    let mut server = Server::new_async().await;
    // Each lookup resolves independently, so geocoding is hit twice
    let geocode = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(PARIS_GEOCODE_BODY)
        .expect(2)
        .create_async()
        .await;
    mock_weather(
        &mut server,
        r#"{"current_weather": {"temperature": 21.5},
            "hourly": {"precipitation_probability": [10, 40, 15]}}"#,
    )
    .await;
    mock_attractions(&mut server, r#"{"elements": [{"tags": {"name": "Louvre"}}]}"#).await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", true, true))
        .await;

    assert_eq!(
        reply,
        "In paris it's currently 21.5°C with a chance of 40% to rain. And In paris these are the places you can go,\nLouvre"
    );
    geocode.assert_async().await;
}

#[tokio::test]
async fn no_flags_defaults_to_attractions_only() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    let weather = server
        .mock("GET", "/forecast")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    mock_attractions(&mut server, r#"{"elements": [{"tags": {"name": "Louvre"}}]}"#).await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("paris", false, false))
        .await;

    assert_eq!(reply, "In paris these are the places you can go,\nLouvre");
    weather.assert_async().await;
}

#[tokio::test]
async fn place_is_trimmed_before_lookup_and_output() {
    let mut server = Server::new_async().await;
    mock_geocode(&mut server, PARIS_GEOCODE_BODY).await;
    mock_weather(&mut server, r#"{"current_weather": {"temperature": 21.5}}"#).await;
    let planner = planner_for(&server);

    let reply = planner
        .plan_trip(&TripRequest::new("  paris  ", true, false))
        .await;

    assert_eq!(reply, "In paris it's currently 21.5°C.");
}
