mod incremental_tests;
mod scenario_tests;
