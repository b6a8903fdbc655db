use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::data_source::DataSource;
use crate::state::{Delta, ProviderCommand};

/// Run the data source on a worker thread. The thread exits once the command
/// channel is closed or the UI side of the delta channel is gone.
pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    source: Box<dyn DataSource>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for cmd in cmd_rx {
            for delta in handle_command(source.as_ref(), cmd) {
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    })
}

pub fn handle_command(source: &dyn DataSource, cmd: ProviderCommand) -> Vec<Delta> {
    match cmd {
        ProviderCommand::FetchPlayers { search } => match source.fetch_players(&search) {
            Ok(players) => vec![Delta::SetPlayers { search, players }],
            Err(err) => vec![Delta::PlayersFailed {
                search,
                message: format!("{err:#}"),
            }],
        },
        ProviderCommand::FetchTeam { team_id } => match source.fetch_team(&team_id) {
            Ok(team) => vec![Delta::SetTeam { team_id, team }],
            Err(err) => vec![
                Delta::Log(format!("[WARN] Team {team_id} lookup error: {err}")),
                Delta::SetTeam {
                    team_id,
                    team: None,
                },
            ],
        },
    }
}
