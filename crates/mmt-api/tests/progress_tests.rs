use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::common;

#[tokio::test]
async fn test_new_player_progress() {
    let client = common::test_client();
    let player = Uuid::new_v4();

    let response = client.get(&format!("/players/{player}/progress")).await;
    response.assert_status(StatusCode::OK);

    let summary: Value = response.json();
    assert_eq!(summary["player_id"], player.to_string());

    let skills = summary["skills"].as_array().unwrap();
    assert_eq!(skills.len(), 5);
    assert_eq!(skills[0]["skill_id"], "doubles");
    assert_eq!(skills[0]["unlocked"], true);
    assert_eq!(skills[0]["mastery"], 0);
    assert_eq!(skills[0]["level"], 1);
    assert_eq!(skills[1]["skill_id"], "near-doubles");
    assert_eq!(skills[1]["unlocked"], false);
    assert!(skills[0].get("next_review_at").is_none());
}

#[tokio::test]
async fn test_progress_reflects_answers() {
    let client = common::test_client();
    let player = Uuid::new_v4();

    for _ in 0..3 {
        client
            .post_json(
                &format!("/players/{player}/answers"),
                &json!({
                    "skill_id": "make-ten",
                    "question": { "text": "4 + ? = 10", "answer": 6, "hint": "Count up" },
                    "correct": true,
                    "time_ms": 2000
                }),
            )
            .await
            .assert_status(StatusCode::OK);
    }

    let summary: Value = client
        .get(&format!("/players/{player}/progress"))
        .await
        .json();
    let make_ten = summary["skills"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["skill_id"] == "make-ten")
        .unwrap();

    assert_eq!(make_ten["total_attempts"], 3);
    assert_eq!(make_ten["streak"], 3);
    assert_eq!(make_ten["mastery"], 24);
    assert_eq!(make_ten["accuracy"], 1.0);
    assert_eq!(make_ten["assessment_note"], "mastered");
}
