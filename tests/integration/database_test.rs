use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::{send_json, unique_name, TestDatabase};
use life_tracker::error::AppError;
use life_tracker::models::{
    CreateGoalRequest, CreateNutritionRequest, CreateWeekMenuRequest, DayMenu, GoalStatus,
};
use life_tracker::services::{GoalService, HealthService};

macro_rules! test_db {
    () => {
        match TestDatabase::new().await {
            Some(db) => db,
            None => return,
        }
    };
}

async fn create_goal(db: &TestDatabase, name: &str) -> Value {
    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/goal/add-goal/",
        Some(json!({
            "name": name,
            "description": "Read twelve books this year",
            "date": "2025-12-31",
            "status": "In progress"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    body["data"].clone()
}

async fn create_nutrition(service: &HealthService, name: &str) -> Uuid {
    service
        .create_nutrition(CreateNutritionRequest {
            food_type: "Lunch".to_string(),
            name: name.to_string(),
            portion: "1 plate".to_string(),
            example: String::new(),
            recipe: String::new(),
            price: 3.5,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_goal_create_then_fetch() {
    let db = test_db!();
    let name = unique_name("Reading");

    let goal = create_goal(&db, &name).await;
    let goal_id = goal["id"].as_str().unwrap().to_string();
    assert_eq!(goal["status"], "In progress");
    assert!(Uuid::parse_str(&goal_id).is_ok());

    let (status, body) = send_json(db.app(), Method::GET, "/goal/get-goals/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "[Goal] retrieved successfully.");
    let goals = body["data"].as_array().unwrap();
    assert!(goals.iter().any(|g| g["id"] == goal_id.as_str() && g["name"] == name.as_str()));

    let uri = format!("/goal/get-goal/{}", goal_id);
    let (status, body) = send_json(db.app(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], name.as_str());
    assert_eq!(body["data"]["objectives"], json!([]));
}

#[tokio::test]
async fn test_goal_defaults_to_pending() {
    let db = test_db!();
    let service = GoalService::new(db.pool.clone());

    let goal = service
        .create_goal(CreateGoalRequest {
            name: unique_name("Default status"),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: None,
        })
        .await
        .unwrap();

    assert_eq!(goal.status, GoalStatus::Pending);
}

#[tokio::test]
async fn test_missing_goal_is_not_found() {
    let db = test_db!();

    let uri = format!("/goal/get-goal/{}", Uuid::new_v4());
    let (status, body) = send_json(db.app(), Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["result"], "error");
}

#[tokio::test]
async fn test_objective_attaches_to_goal() {
    let db = test_db!();
    let goal = create_goal(&db, &unique_name("Savings")).await;
    let goal_id = goal["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/goal/add-objective/",
        Some(json!({
            "name": "Emergency fund",
            "description": "Three months of expenses",
            "is_boolean": 0,
            "start_value": 0.0,
            "end_value": 1500.0,
            "currency_unit": "USD",
            "goal_id": goal_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    assert_eq!(body["message"], "[Objective] created successfully.");
    assert_eq!(body["data"]["is_boolean"], false);

    let uri = format!("/goals/get-objectives-by-goal/{}", goal_id);
    let (status, body) = send_json(db.app(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["currency_unit"], "USD");

    let uri = format!("/goal/get-goal/{}", goal_id);
    let (_, body) = send_json(db.app(), Method::GET, &uri, None).await;
    assert_eq!(body["data"]["objectives"][0]["name"], "Emergency fund");
}

#[tokio::test]
async fn test_objective_with_unknown_goal_is_rejected() {
    let db = test_db!();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/goal/add-objective/",
        Some(json!({
            "name": "Orphan",
            "description": "",
            "goal_id": Uuid::new_v4()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"], "error");
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_weight_log_round_trip() {
    let db = test_db!();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/health/add-weight/",
        Some(json!({
            "date": "2024-11-02",
            "weight": 82.4,
            "imc": 25.1,
            "bodyFat": 21.0,
            "subcutaneousFat": 18.5,
            "viseralFat": 9.0,
            "muscleMass": 36.2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    let id = body["data"]["id"].clone();

    let (status, body) = send_json(db.app(), Method::GET, "/health/get-weights/", None).await;
    assert_eq!(status, StatusCode::OK);
    let weights = body["data"].as_array().unwrap();
    let stored = weights.iter().find(|w| w["id"] == id).unwrap();
    assert_eq!(stored["visceral_fat"], 9.0);
}

#[tokio::test]
async fn test_menu_with_unknown_nutrition_is_foreign_key_error() {
    let db = test_db!();
    let id = Uuid::new_v4();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/health/add-menu/",
        Some(json!({
            "menu_week_id": Uuid::new_v4(),
            "day_of_week": 3,
            "breakfast_id": id,
            "breakfast_snack_id": id,
            "lunch_id": id,
            "afternoon_snack_id": id,
            "dinner_id": id,
            "night_snack_id": id
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Error adding record. Check the foreign keys."));
}

#[tokio::test]
async fn test_week_menu_is_created_and_listed_by_day() {
    let db = test_db!();
    let service = HealthService::new(db.pool.clone());
    let dish = create_nutrition(&service, &unique_name("Casado")).await;

    let day = |day_of_week: i16| DayMenu {
        day_of_week,
        breakfast_id: dish,
        breakfast_snack_id: dish,
        lunch_id: dish,
        afternoon_snack_id: dish,
        dinner_id: dish,
        night_snack_id: dish,
    };

    let week = service
        .create_week_menu(CreateWeekMenuRequest {
            menu_week_id: None,
            days: vec![day(5), day(1), day(3)],
        })
        .await
        .unwrap();

    let days: Vec<i16> = week.days.iter().map(|menu| menu.day_of_week).collect();
    assert_eq!(days, vec![1, 3, 5]);

    let uri = format!("/health/get-menu-week/{}", week.menu_week_id);
    let (status, body) = send_json(db.app(), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["days"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["days"][0]["day_of_week"], 1);
}

#[tokio::test]
async fn test_week_menu_rolls_back_on_bad_day() {
    let db = test_db!();
    let service = HealthService::new(db.pool.clone());
    let dish = create_nutrition(&service, &unique_name("Olla de carne")).await;
    let menu_week_id = Uuid::new_v4();

    let mut bad_day = DayMenu {
        day_of_week: 2,
        breakfast_id: dish,
        breakfast_snack_id: dish,
        lunch_id: dish,
        afternoon_snack_id: dish,
        dinner_id: dish,
        night_snack_id: dish,
    };
    let good_day = DayMenu {
        day_of_week: 1,
        ..bad_day.clone()
    };
    bad_day.dinner_id = Uuid::new_v4();

    let err = service
        .create_week_menu(CreateWeekMenuRequest {
            menu_week_id: Some(menu_week_id),
            days: vec![good_day, bad_day],
        })
        .await
        .unwrap_err();
    assert_matches!(AppError::from(err), AppError::ForeignKey(_));

    let week = service.get_menu_week(menu_week_id).await.unwrap();
    assert!(week.days.is_empty());
}

#[tokio::test]
async fn test_activity_log_is_ordered_by_date() {
    let db = test_db!();
    let later = unique_name("Dune");
    let earlier = unique_name("Akira");

    for (date, title) in [("2031-02-10", &later), ("2031-01-05", &earlier)] {
        let (status, body) = send_json(
            db.app(),
            Method::POST,
            "/hobbies/add-activity/",
            Some(json!({
                "date": date,
                "title": title,
                "rating": 8,
                "category": "Pelicula"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        assert_eq!(body["data"]["category"], "Pelicula");
    }

    let (status, body) = send_json(db.app(), Method::GET, "/hobbies/get-activity-log/", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["title"].as_str())
        .collect();
    let earlier_pos = titles.iter().position(|t| *t == earlier.as_str()).unwrap();
    let later_pos = titles.iter().position(|t| *t == later.as_str()).unwrap();
    assert!(earlier_pos < later_pos);
}

#[tokio::test]
async fn test_database_check_reports_database_name() {
    let db = test_db!();

    let (status, body) = send_json(db.app(), Method::GET, "/api", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["database"].is_string());
}

fn menu_day(day_of_week: i16, dish: Uuid) -> DayMenu {
    DayMenu {
        day_of_week,
        breakfast_id: dish,
        breakfast_snack_id: dish,
        lunch_id: dish,
        afternoon_snack_id: dish,
        dinner_id: dish,
        night_snack_id: dish,
    }
}

fn menu_body(menu_week_id: Uuid, day_of_week: i16, dish: Uuid) -> Value {
    json!({
        "menu_week_id": menu_week_id,
        "day_of_week": day_of_week,
        "breakfast_id": dish,
        "breakfast_snack_id": dish,
        "lunch_id": dish,
        "afternoon_snack_id": dish,
        "dinner_id": dish,
        "night_snack_id": dish
    })
}

#[tokio::test]
async fn test_day_cannot_repeat_across_requests_for_one_week() {
    let db = test_db!();
    let service = HealthService::new(db.pool.clone());
    let dish = create_nutrition(&service, &unique_name("Arroz con pollo")).await;
    let menu_week_id = Uuid::new_v4();

    service
        .create_week_menu(CreateWeekMenuRequest {
            menu_week_id: Some(menu_week_id),
            days: vec![menu_day(1, dish)],
        })
        .await
        .unwrap();

    let err = service
        .create_week_menu(CreateWeekMenuRequest {
            menu_week_id: Some(menu_week_id),
            days: vec![menu_day(1, dish)],
        })
        .await
        .unwrap_err();
    assert_matches!(AppError::from(err), AppError::BadRequest(_));

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/health/add-menu/",
        Some(menu_body(menu_week_id, 1, dish)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["result"], "error");
    assert_eq!(
        body["message"],
        "Error adding record. That day already has a menu in this week."
    );

    let week = service.get_menu_week(menu_week_id).await.unwrap();
    let days: Vec<i16> = week.days.iter().map(|menu| menu.day_of_week).collect();
    assert_eq!(days, vec![1]);
}

#[tokio::test]
async fn test_add_menu_returns_created_day() {
    let db = test_db!();
    let service = HealthService::new(db.pool.clone());
    let dish = create_nutrition(&service, &unique_name("Sopa negra")).await;
    let menu_week_id = Uuid::new_v4();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/health/add-menu/",
        Some(menu_body(menu_week_id, 4, dish)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    assert_eq!(body["message"], "[Menu] created successfully.");
    assert_eq!(body["data"]["day_of_week"], 4);
    assert_eq!(body["data"]["menu_week_id"], menu_week_id.to_string());
    assert_eq!(body["data"]["lunch_id"], dish.to_string());
    assert!(Uuid::parse_str(body["data"]["id"].as_str().unwrap()).is_ok());

    let week = service.get_menu_week(menu_week_id).await.unwrap();
    assert_eq!(week.days.len(), 1);
    assert_eq!(week.days[0].day_of_week, 4);
}

#[tokio::test]
async fn test_nutrition_listed_by_food_type_then_name() {
    let db = test_db!();
    let food_type = unique_name("Snack");

    for name in ["Banana", "Apple"] {
        let (status, body) = send_json(
            db.app(),
            Method::POST,
            "/health/add-nutrition/",
            Some(json!({
                "food_type": food_type,
                "name": name,
                "portion": "1 unit",
                "price": 0.5
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
        assert_eq!(body["data"]["recipe"], "");
    }

    let (status, body) = send_json(db.app(), Method::GET, "/health/get-nutrition/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "[Nutrition] retrieved successfully.");

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["food_type"] == food_type.as_str())
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Apple", "Banana"]);
}

#[tokio::test]
async fn test_get_objectives_lists_created_objective() {
    let db = test_db!();
    let goal = create_goal(&db, &unique_name("Fitness")).await;
    let goal_id = goal["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        db.app(),
        Method::POST,
        "/goal/add-objective/",
        Some(json!({
            "name": "Run 10k",
            "description": "Under an hour",
            "start_number": 0,
            "end_number": 10,
            "goal_id": goal_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    let objective_id = body["data"]["id"].clone();

    let (status, body) = send_json(db.app(), Method::GET, "/goals/get-objectives/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "[Objective] retrieved successfully.");

    let objectives = body["data"].as_array().unwrap();
    let stored = objectives.iter().find(|o| o["id"] == objective_id).unwrap();
    assert_eq!(stored["goal_id"], goal_id.as_str());
    assert_eq!(stored["end_number"], 10);
}
