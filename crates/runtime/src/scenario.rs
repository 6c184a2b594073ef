// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The classic five-customer, three-resource demonstration case.

use resource_model::{StateError, SystemState};

/// Total units of each resource type.
pub const CLASSIC_TOTAL: [i64; 3] = [10, 5, 7];

/// Per-customer maximum demand.
pub const CLASSIC_MAXIMUM: [[i64; 3]; 5] = [[7, 5, 3], [3, 2, 2], [9, 0, 2], [2, 2, 2], [4, 3, 3]];

/// Units already held when the demonstration starts.
pub const CLASSIC_ALLOCATION: [[i64; 3]; 5] =
    [[0, 1, 0], [2, 0, 0], [3, 0, 2], [2, 1, 1], [0, 0, 2]];

/// Commands played by the demonstration: one grant, one shortage, one unsafe
/// denial, then a release and a final snapshot.
pub const CLASSIC_COMMANDS: &str = "\
# customer 1 asks for {1,0,2}: granted, sequence <1,3,0,2,4> exists
RQ 1 1 0 2
# customer 4 asks for 3 of resource 0 but only 2 are free
RQ 4 3 3 0
# customer 0 asks for {0,2,0}: would leave the system unsafe
RQ 0 0 2 0
# customer 1 returns what it was granted
RL 1 1 0 2
*
";

/// Builds the demonstration state. Available starts at `{3,3,2}`.
pub fn classic_state() -> Result<SystemState, StateError> {
    let maximum: Vec<Vec<i64>> = CLASSIC_MAXIMUM.iter().map(|r| r.to_vec()).collect();
    let allocation: Vec<Vec<i64>> = CLASSIC_ALLOCATION.iter().map(|r| r.to_vec()).collect();
    SystemState::from_parts(&CLASSIC_TOTAL, &maximum, &allocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_state() {
        let s = classic_state().unwrap();
        assert_eq!(s.num_customers(), 5);
        assert_eq!(s.available(), &[3, 3, 2]);
        assert_eq!(s.need(0), &[7, 4, 3]);
        assert!(s.check_invariants().is_ok());
    }

    #[test]
    fn test_classic_commands_parse() {
        let parser = command_stream::CommandParser::new(3);
        let parsed: Vec<_> = parser.parse_str(CLASSIC_COMMANDS).collect();
        assert_eq!(parsed.len(), 5);
        assert!(parsed.iter().all(|(_, c)| c.is_ok()));
    }
}
