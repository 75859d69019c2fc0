//! # sheet-sim
//!
//! Simulated host for the wallet component in wallet-sheet-rs.
//!
//! This crate provides:
//! - A scriptable platform with fixed capability answers
//! - A tokio host loop that serializes sheet events into the component
//! - A recording delegate
//! - The scripted sessions the `sheet-sim` binary runs

pub mod host;
pub mod platform;
pub mod recorder;
pub mod scenario;

pub use host::{HostCommand, HostError, SheetHost};
pub use platform::{SimulatedPlatform, SimulatedSheet};
pub use recorder::{DelegateEvent, RecordingDelegate};
pub use scenario::{
    load_demo_configuration, parse_brands, run_scenario, Scenario, ScenarioReport, SimSettings,
};
