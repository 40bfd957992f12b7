use std::sync::Arc;

use crate::{
    domain::{action::ActionRepository, game::GameRepository, player::PlayerRepository},
    workflow::{
        action::{
            list::{ListActionsUseCase, ListActionsUseCaseImpl},
            record::{RecordActionUseCase, RecordActionUseCaseImpl},
            remove::{RemoveActionUseCase, RemoveActionUseCaseImpl},
        },
        game::{
            create::{CreateGameUseCase, CreateGameUseCaseImpl},
            get::{GetGameUseCase, GetGameUseCaseImpl},
            list::{ListGamesUseCase, ListGamesUseCaseImpl},
            remove::{RemoveGameUseCase, RemoveGameUseCaseImpl},
        },
        player::{
            create::{CreatePlayerUseCase, CreatePlayerUseCaseImpl},
            get::{GetPlayerUseCase, GetPlayerUseCaseImpl},
            list::{ListPlayersUseCase, ListPlayersUseCaseImpl},
            remove::{RemovePlayerUseCase, RemovePlayerUseCaseImpl},
            rename::{RenamePlayerUseCase, RenamePlayerUseCaseImpl},
        },
        summary::{
            overview::{PlayersOverviewUseCase, PlayersOverviewUseCaseImpl},
            player_game::{PlayerGameStatsUseCase, PlayerGameStatsUseCaseImpl},
            player_totals::{PlayerTotalsUseCase, PlayerTotalsUseCaseImpl},
        },
    },
};

pub mod domain;
pub mod workflow;

#[cfg(test)]
mod testing;

pub struct Application {
    pub player_create_use_case: Box<dyn CreatePlayerUseCase + Send + Sync + 'static>,
    pub player_get_use_case: Box<dyn GetPlayerUseCase + Send + Sync + 'static>,
    pub player_list_use_case: Box<dyn ListPlayersUseCase + Send + Sync + 'static>,
    pub player_rename_use_case: Box<dyn RenamePlayerUseCase + Send + Sync + 'static>,
    pub player_remove_use_case: Box<dyn RemovePlayerUseCase + Send + Sync + 'static>,

    pub game_create_use_case: Box<dyn CreateGameUseCase + Send + Sync + 'static>,
    pub game_get_use_case: Box<dyn GetGameUseCase + Send + Sync + 'static>,
    pub game_list_use_case: Box<dyn ListGamesUseCase + Send + Sync + 'static>,
    pub game_remove_use_case: Box<dyn RemoveGameUseCase + Send + Sync + 'static>,

    pub action_record_use_case: Box<dyn RecordActionUseCase + Send + Sync + 'static>,
    pub action_remove_use_case: Box<dyn RemoveActionUseCase + Send + Sync + 'static>,
    pub action_list_use_case: Box<dyn ListActionsUseCase + Send + Sync + 'static>,

    pub stats_player_game_use_case: Box<dyn PlayerGameStatsUseCase + Send + Sync + 'static>,
    pub stats_player_totals_use_case: Box<dyn PlayerTotalsUseCase + Send + Sync + 'static>,
    pub stats_overview_use_case: Box<dyn PlayersOverviewUseCase + Send + Sync + 'static>,
}

pub fn build_application<
    P: PlayerRepository + Send + Sync + 'static,
    G: GameRepository + Send + Sync + 'static,
    A: ActionRepository + Send + Sync + 'static,
>(
    player_repository: Arc<P>,
    game_repository: Arc<G>,
    action_repository: Arc<A>,
) -> Application {
    Application {
        player_create_use_case: Box::new(CreatePlayerUseCaseImpl::new(player_repository.clone())),
        player_get_use_case: Box::new(GetPlayerUseCaseImpl::new(player_repository.clone())),
        player_list_use_case: Box::new(ListPlayersUseCaseImpl::new(player_repository.clone())),
        player_rename_use_case: Box::new(RenamePlayerUseCaseImpl::new(player_repository.clone())),
        player_remove_use_case: Box::new(RemovePlayerUseCaseImpl::new(player_repository.clone())),

        game_create_use_case: Box::new(CreateGameUseCaseImpl::new(game_repository.clone())),
        game_get_use_case: Box::new(GetGameUseCaseImpl::new(game_repository.clone())),
        game_list_use_case: Box::new(ListGamesUseCaseImpl::new(game_repository.clone())),
        game_remove_use_case: Box::new(RemoveGameUseCaseImpl::new(game_repository.clone())),

        action_record_use_case: Box::new(RecordActionUseCaseImpl::new(
            game_repository.clone(),
            player_repository.clone(),
            action_repository.clone(),
        )),
        action_remove_use_case: Box::new(RemoveActionUseCaseImpl::new(
            game_repository.clone(),
            player_repository.clone(),
            action_repository.clone(),
        )),
        action_list_use_case: Box::new(ListActionsUseCaseImpl::new(
            game_repository.clone(),
            player_repository.clone(),
            action_repository.clone(),
        )),

        stats_player_game_use_case: Box::new(PlayerGameStatsUseCaseImpl::new(
            game_repository.clone(),
            player_repository.clone(),
            action_repository.clone(),
        )),
        stats_player_totals_use_case: Box::new(PlayerTotalsUseCaseImpl::new(
            game_repository.clone(),
            player_repository.clone(),
            action_repository.clone(),
        )),
        stats_overview_use_case: Box::new(PlayersOverviewUseCaseImpl::new(
            game_repository,
            player_repository,
            action_repository,
        )),
    }
}
