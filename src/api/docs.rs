use axum::{
    extract::State,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{ActivityCategory, GoalStatus, DEFAULT_SYSTEM_INSTRUCTION, VALID_CURRENCIES};

#[derive(Clone)]
pub struct DocsState {
    pub title: String,
    pub spec: Arc<Value>,
}

/// Create documentation routes
pub fn docs_routes(config: &AppConfig) -> Router {
    let state = DocsState {
        title: config.docs_title(),
        spec: Arc::new(openapi_document(config)),
    };

    Router::new()
        .route("/docs", get(swagger_ui))
        .route("/docs/openapi.json", get(openapi_spec))
        .with_state(state)
}

pub async fn openapi_spec(State(state): State<DocsState>) -> Json<Value> {
    Json(state.spec.as_ref().clone())
}

pub async fn swagger_ui(State(state): State<DocsState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@4.15.5/swagger-ui.css" />
    <style>
        body {{ margin: 0; background: #fafafa; }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@4.15.5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{
                url: '/docs/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [SwaggerUIBundle.presets.apis],
                validatorUrl: null,
                tryItOutEnabled: true
            }});
        }};
    </script>
</body>
</html>
"#,
        title = state.title
    ))
}

/// OpenAPI 3.0.3 description of every JSON route.
pub fn openapi_document(config: &AppConfig) -> Value {
    let mut paths = Map::new();

    // System
    paths.insert(
        "/health".into(),
        json!({ "get": operation("System", "Liveness probe", None, plain_response("Service status")) }),
    );
    paths.insert(
        "/api".into(),
        json!({ "get": operation("System", "Database connectivity check", None, envelope_responses("200", "Database reachable")) }),
    );

    // Goal
    paths.insert(
        "/goal/add-goal/".into(),
        json!({ "post": operation("Goal", "Add a goal", Some("GoalIn"), envelope_responses("201", "Goal created")) }),
    );
    paths.insert(
        "/goal/get-goals/".into(),
        json!({ "get": operation("Goal", "List goals with their objectives", None, envelope_responses("200", "Goals")) }),
    );
    paths.insert(
        "/goal/get-goal/{goal_id}".into(),
        json!({ "get": with_path_param(
            operation("Goal", "Get one goal with its objectives", None, not_found(envelope_responses("200", "Goal"))),
            "goal_id",
        ) }),
    );
    paths.insert(
        "/goal/add-objective/".into(),
        json!({ "post": operation("Goal", "Add an objective to a goal", Some("ObjectiveIn"), envelope_responses("201", "Objective created")) }),
    );
    paths.insert(
        "/goals/get-objectives/".into(),
        json!({ "get": operation("Goal", "List objectives", None, envelope_responses("200", "Objectives")) }),
    );
    paths.insert(
        "/goals/get-objectives-by-goal/{goal_id}".into(),
        json!({ "get": with_path_param(
            operation("Goal", "List the objectives of a goal", None, envelope_responses("200", "Objectives")),
            "goal_id",
        ) }),
    );

    // Health
    paths.insert(
        "/health/add-weight/".into(),
        json!({ "post": operation("Health", "Log a weight measurement", Some("WeightIn"), envelope_responses("201", "Weight created")) }),
    );
    paths.insert(
        "/health/get-weights/".into(),
        json!({ "get": operation("Health", "List weight measurements", None, envelope_responses("200", "Weights")) }),
    );
    paths.insert(
        "/health/add-nutrition/".into(),
        json!({ "post": operation("Health", "Add a nutrition item", Some("NutritionIn"), envelope_responses("201", "Nutrition created")) }),
    );
    paths.insert(
        "/health/get-nutrition/".into(),
        json!({ "get": operation("Health", "List nutrition items", None, envelope_responses("200", "Nutrition items")) }),
    );
    paths.insert(
        "/health/add-menu/".into(),
        json!({ "post": operation("Health", "Add one day of a weekly menu", Some("MenuIn"), envelope_responses("201", "Menu created")) }),
    );
    paths.insert(
        "/health/add-week-menu/".into(),
        json!({ "post": operation("Health", "Add a whole weekly menu at once", Some("WeekMenuIn"), envelope_responses("201", "Week menu created")) }),
    );
    paths.insert(
        "/health/get-menu-week/{menu_week_id}".into(),
        json!({ "get": with_path_param(
            operation("Health", "Get the days of a weekly menu", None, envelope_responses("200", "Week menu")),
            "menu_week_id",
        ) }),
    );

    // Hobbies
    paths.insert(
        "/hobbies/add-activity/".into(),
        json!({ "post": operation("Hobbies", "Log a rated activity", Some("ActivityIn"), envelope_responses("201", "Activity created")) }),
    );
    paths.insert(
        "/hobbies/get-activity-log/".into(),
        json!({ "get": operation("Hobbies", "List the activity log", None, envelope_responses("200", "Activity log")) }),
    );

    // Gemini
    paths.insert(
        "/gemini/".into(),
        json!({ "post": operation("Gemini", "Generate text with Gemini", Some("GeminiIn"), envelope_responses("200", "Generated text")) }),
    );

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": config.docs_title(),
            "description": format!("{} REST API", config.app_name),
            "version": config.version,
        },
        "tags": [
            { "name": "Goal", "description": "Goals and their objectives" },
            { "name": "Health", "description": "Weight, nutrition and weekly menus" },
            { "name": "Hobbies", "description": "Rated activity log" },
            { "name": "Gemini", "description": "Generative text wrapper" },
            { "name": "System", "description": "Liveness and connectivity" }
        ],
        "paths": paths,
        "components": { "schemas": schemas() },
    })
}

fn operation(tag: &str, summary: &str, body_schema: Option<&str>, responses: Value) -> Value {
    let mut op = json!({
        "tags": [tag],
        "summary": summary,
        "responses": responses,
    });

    if let Some(schema) = body_schema {
        op["requestBody"] = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": format!("#/components/schemas/{}", schema) }
                }
            }
        });
    }

    op
}

fn with_path_param(mut op: Value, name: &str) -> Value {
    op["parameters"] = json!([{
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    }]);
    op
}

fn envelope_content(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Envelope" }
            }
        }
    })
}

fn envelope_responses(success_code: &str, description: &str) -> Value {
    let mut responses = Map::new();
    responses.insert(success_code.to_string(), envelope_content(description));
    responses.insert("400".to_string(), envelope_content("Validation or request error"));
    responses.insert("500".to_string(), envelope_content("Internal error"));
    Value::Object(responses)
}

fn not_found(mut responses: Value) -> Value {
    responses["404"] = envelope_content("Not found");
    responses
}

fn plain_response(description: &str) -> Value {
    json!({
        "200": {
            "description": description,
            "content": { "application/json": { "schema": { "type": "object" } } }
        }
    })
}

fn string_field(max_length: usize) -> Value {
    json!({ "type": "string", "maxLength": max_length })
}

fn number_range(minimum: f64, maximum: f64) -> Value {
    json!({ "type": "number", "minimum": minimum, "maximum": maximum })
}

fn uuid_field() -> Value {
    json!({ "type": "string", "format": "uuid" })
}

fn schemas() -> Value {
    let statuses: Vec<&str> = GoalStatus::ALL.iter().map(|status| status.as_str()).collect();
    let categories: Vec<&str> = ActivityCategory::ALL
        .iter()
        .map(|category| category.as_str())
        .collect();

    let day_menu_properties = json!({
        "day_of_week": { "type": "integer", "minimum": 1, "maximum": 7 },
        "breakfast_id": uuid_field(),
        "breakfast_snack_id": uuid_field(),
        "lunch_id": uuid_field(),
        "afternoon_snack_id": uuid_field(),
        "dinner_id": uuid_field(),
        "night_snack_id": uuid_field(),
    });
    let day_menu_required = json!([
        "day_of_week", "breakfast_id", "breakfast_snack_id", "lunch_id",
        "afternoon_snack_id", "dinner_id", "night_snack_id"
    ]);

    let mut menu_properties = day_menu_properties.clone();
    menu_properties["menu_week_id"] = uuid_field();
    let mut menu_required = day_menu_required.clone();
    if let Some(required) = menu_required.as_array_mut() {
        required.push(json!("menu_week_id"));
    }

    json!({
        "Envelope": {
            "type": "object",
            "properties": {
                "result": { "type": "string", "enum": ["ok", "error"] },
                "message": { "type": "string" },
                "status_code": { "type": "integer" },
                "data": { "nullable": true }
            },
            "required": ["result", "message", "status_code", "data"]
        },
        "GoalIn": {
            "type": "object",
            "properties": {
                "name": string_field(100),
                "description": string_field(500),
                "date": { "type": "string", "format": "date" },
                "status": { "type": "string", "enum": statuses, "default": "Pending" }
            },
            "required": ["name", "description", "date"]
        },
        "ObjectiveIn": {
            "type": "object",
            "properties": {
                "name": string_field(100),
                "description": string_field(500),
                "start_number": { "type": "integer", "nullable": true },
                "end_number": { "type": "integer", "nullable": true },
                "is_boolean": { "type": "boolean", "default": false },
                "start_value": { "type": "number", "nullable": true },
                "end_value": { "type": "number", "nullable": true },
                "currency_unit": { "type": "string", "enum": VALID_CURRENCIES, "nullable": true },
                "goal_id": uuid_field()
            },
            "required": ["name", "description", "goal_id"]
        },
        "WeightIn": {
            "type": "object",
            "properties": {
                "date": { "type": "string", "format": "date" },
                "weight": number_range(0.0, 300.0),
                "imc": number_range(0.0, 100.0),
                "body_fat": number_range(0.0, 100.0),
                "subcutaneous_fat": number_range(0.0, 100.0),
                "visceral_fat": number_range(0.0, 100.0),
                "muscle_mass": number_range(0.0, 100.0)
            },
            "required": ["date", "weight", "imc", "body_fat", "subcutaneous_fat", "visceral_fat", "muscle_mass"]
        },
        "NutritionIn": {
            "type": "object",
            "properties": {
                "food_type": string_field(40),
                "name": string_field(100),
                "portion": string_field(36),
                "example": string_field(100),
                "recipe": string_field(500),
                "price": { "type": "number", "minimum": 0 }
            },
            "required": ["food_type", "name", "portion", "price"]
        },
        "DayMenuIn": {
            "type": "object",
            "properties": day_menu_properties,
            "required": day_menu_required
        },
        "MenuIn": {
            "type": "object",
            "properties": menu_properties,
            "required": menu_required
        },
        "WeekMenuIn": {
            "type": "object",
            "properties": {
                "menu_week_id": uuid_field(),
                "days": {
                    "type": "array",
                    "minItems": 1,
                    "maxItems": 7,
                    "items": { "$ref": "#/components/schemas/DayMenuIn" }
                }
            },
            "required": ["days"]
        },
        "ActivityIn": {
            "type": "object",
            "properties": {
                "date": { "type": "string", "format": "date" },
                "title": { "type": "string", "minLength": 1, "maxLength": 50 },
                "rating": { "type": "integer", "minimum": 1, "maximum": 10 },
                "category": { "type": "string", "enum": categories }
            },
            "required": ["date", "title", "rating", "category"]
        },
        "GeminiIn": {
            "type": "object",
            "properties": {
                "prompt": { "type": "string", "minLength": 1, "maxLength": 500 },
                "sys_instruction": { "type": "string", "default": DEFAULT_SYSTEM_INSTRUCTION }
            },
            "required": ["prompt"]
        }
    })
}
