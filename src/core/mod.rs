// Core module - Report rendering and log following engines
pub mod logs;
pub mod report;
