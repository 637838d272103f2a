mod composer_snapshots;
mod controller_flow;
mod helpers;
mod terminal_events;
