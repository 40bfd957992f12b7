use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use bvb_stats_app::workflow::{
    action::{list::ListActionsError, record::RecordActionError, remove::RemoveActionError},
    game::{
        create::CreateGameError, get::GetGameError, list::ListGamesError, remove::RemoveGameError,
    },
    player::{
        create::CreatePlayerError, get::GetPlayerError, list::ListPlayersError,
        remove::RemovePlayerError, rename::RenamePlayerError,
    },
    summary::StatsQueryError,
};

#[derive(Debug)]
pub enum ServiceError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::http::Response<axum::body::Body> {
        let (status, msg) = match self {
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServiceError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServiceError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServiceError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        let body = serde_json::json!({ "error": msg });
        (status, axum::Json(body)).into_response()
    }
}

const INTERNAL: &str = "Internal server error";

impl From<JsonRejection> for ServiceError {
    fn from(value: JsonRejection) -> Self {
        ServiceError::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ServiceError {
    fn from(value: PathRejection) -> Self {
        ServiceError::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(value: QueryRejection) -> Self {
        ServiceError::BadRequest(value.body_text())
    }
}

impl From<CreatePlayerError> for ServiceError {
    fn from(value: CreatePlayerError) -> Self {
        match value {
            CreatePlayerError::InvalidName(_) | CreatePlayerError::NameTaken => {
                ServiceError::BadRequest(value.to_string())
            }
            CreatePlayerError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<GetPlayerError> for ServiceError {
    fn from(value: GetPlayerError) -> Self {
        match value {
            GetPlayerError::NotFound => ServiceError::NotFound("Player not found".to_string()),
            GetPlayerError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<ListPlayersError> for ServiceError {
    fn from(value: ListPlayersError) -> Self {
        match value {
            ListPlayersError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<RenamePlayerError> for ServiceError {
    fn from(value: RenamePlayerError) -> Self {
        match value {
            RenamePlayerError::InvalidName(_) => ServiceError::BadRequest(value.to_string()),
            RenamePlayerError::NotFound => ServiceError::NotFound("Player not found".to_string()),
            RenamePlayerError::NameTaken => ServiceError::Conflict(value.to_string()),
            RenamePlayerError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<RemovePlayerError> for ServiceError {
    fn from(value: RemovePlayerError) -> Self {
        match value {
            RemovePlayerError::NotFound => ServiceError::NotFound("Player not found".to_string()),
            RemovePlayerError::InUse => ServiceError::Conflict(value.to_string()),
            RemovePlayerError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<CreateGameError> for ServiceError {
    fn from(value: CreateGameError) -> Self {
        match value {
            CreateGameError::InvalidRoster(_) => ServiceError::BadRequest(value.to_string()),
            CreateGameError::PlayerNotFound(_) => ServiceError::NotFound(value.to_string()),
            CreateGameError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<GetGameError> for ServiceError {
    fn from(value: GetGameError) -> Self {
        match value {
            GetGameError::NotFound => ServiceError::NotFound("Game not found".to_string()),
            GetGameError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<ListGamesError> for ServiceError {
    fn from(value: ListGamesError) -> Self {
        match value {
            ListGamesError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<RemoveGameError> for ServiceError {
    fn from(value: RemoveGameError) -> Self {
        match value {
            RemoveGameError::NotFound => ServiceError::NotFound("Game not found".to_string()),
            RemoveGameError::InUse => ServiceError::Conflict(value.to_string()),
            RemoveGameError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<RecordActionError> for ServiceError {
    fn from(value: RecordActionError) -> Self {
        match value {
            RecordActionError::GameNotFound(_) | RecordActionError::PlayerNotFound(_) => {
                ServiceError::NotFound(value.to_string())
            }
            RecordActionError::DetailMismatch { .. }
            | RecordActionError::PlayerNotOnRoster { .. } => {
                ServiceError::BadRequest(value.to_string())
            }
            RecordActionError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<RemoveActionError> for ServiceError {
    fn from(value: RemoveActionError) -> Self {
        match value {
            RemoveActionError::GameNotFound(_) | RemoveActionError::StatNotFound(_) => {
                ServiceError::NotFound(value.to_string())
            }
            RemoveActionError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<ListActionsError> for ServiceError {
    fn from(value: ListActionsError) -> Self {
        match value {
            ListActionsError::GameNotFound(_) | ListActionsError::PlayerNotFound(_) => {
                ServiceError::NotFound(value.to_string())
            }
            ListActionsError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}

impl From<StatsQueryError> for ServiceError {
    fn from(value: StatsQueryError) -> Self {
        match value {
            StatsQueryError::PlayerNotFound(_) | StatsQueryError::GameNotFound(_) => {
                ServiceError::NotFound(value.to_string())
            }
            StatsQueryError::RepositoryError => ServiceError::Internal(INTERNAL.to_string()),
        }
    }
}
