//! UI Widgets - reusable UI components
//!
//! Each widget is self-contained and communicates via EventBus

pub mod props;
