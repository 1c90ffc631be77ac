//! End-to-end HTTP flows.

mod scan_flows;
