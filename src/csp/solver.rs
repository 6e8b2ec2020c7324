//! Backtracking search with forward checking.
//!
//! Deterministic: variables are picked by (tier, remaining-domain size,
//! index), values tried in ascending order, so two runs over the same
//! problem visit the same tree. Every satisfying assignment is enumerated
//! up to the caller's cap; constraints observed failing on dead ends are
//! reported for diagnostics.

use super::{ConstraintId, Domain, Problem, Value, VarId};

/// One satisfying assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<Value>,
}

impl Solution {
    /// The assigned value of a variable.
    pub fn value(&self, var: VarId) -> Value {
        self.values[var.index()]
    }

    /// All values in variable order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// The result of exhausting the search tree.
#[derive(Debug)]
pub struct SolveReport {
    /// Every satisfying assignment found, in discovery order.
    pub solutions: Vec<Solution>,
    /// Constraints that pruned a branch somewhere in the search, sorted.
    pub conflicts: Vec<ConstraintId>,
    /// True when the solution cap stopped the enumeration early.
    pub truncated: bool,
}

/// Enumerates all solutions of `problem`, stopping after `limit`.
pub fn solve_all(problem: &Problem, limit: usize) -> SolveReport {
    let mut search = Search {
        problem,
        domains: problem.vars.iter().map(|v| v.domain).collect(),
        assigned: vec![None; problem.vars.len()],
        trail: Vec::new(),
        solutions: Vec::new(),
        conflict_seen: vec![false; problem.constraints.len()],
        limit,
        truncated: false,
    };
    search.run();
    let conflicts = search
        .conflict_seen
        .iter()
        .enumerate()
        .filter_map(|(i, &seen)| seen.then_some(ConstraintId(i)))
        .collect();
    SolveReport { solutions: search.solutions, conflicts, truncated: search.truncated }
}

struct Search<'a> {
    problem: &'a Problem,
    domains: Vec<Domain>,
    assigned: Vec<Option<Value>>,
    /// Undo log of domain narrowings: (var index, previous domain).
    trail: Vec<(usize, Domain)>,
    solutions: Vec<Solution>,
    conflict_seen: Vec<bool>,
    limit: usize,
    truncated: bool,
}

impl Search<'_> {
    fn run(&mut self) {
        if self.problem.vars.is_empty() {
            self.solutions.push(Solution { values: Vec::new() });
            return;
        }
        self.search();
    }

    fn search(&mut self) {
        if self.solutions.len() >= self.limit {
            self.truncated = true;
            return;
        }

        let var = match self.pick_var() {
            Some(v) => v,
            None => {
                let values = self.assigned.iter().map(|a| a.expect("all assigned")).collect();
                self.solutions.push(Solution { values });
                return;
            }
        };

        let candidates: Vec<Value> = self.domains[var.index()].iter().collect();
        for v in candidates {
            let mark = self.trail.len();
            if self.assign(var, v) {
                self.search();
            }
            self.undo_to(mark);
            self.assigned[var.index()] = None;
            if self.truncated {
                return;
            }
        }
    }

    /// Unassigned variable with the lowest (tier, domain size, index).
    fn pick_var(&self) -> Option<VarId> {
        self.assigned
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i)
            .min_by_key(|&i| (self.problem.vars[i].tier, self.domains[i].len(), i))
            .map(VarId)
    }

    /// Assigns `var := v` and forward-checks every constraint touching it.
    /// Returns false (after recording the culprit) when a constraint fails
    /// or empties a neighbour's domain.
    fn assign(&mut self, var: VarId, v: Value) -> bool {
        self.assigned[var.index()] = Some(v);
        self.narrow(var.index(), Domain::singleton(v));

        for &ci in &self.problem.touching[var.index()] {
            let constraint = &self.problem.constraints[ci];
            let mut open: Option<(usize, VarId)> = None;
            let mut over = false;
            for (pos, &s) in constraint.scope.iter().enumerate() {
                if self.assigned[s.index()].is_none() {
                    if open.is_some() {
                        over = true;
                        break;
                    }
                    open = Some((pos, s));
                }
            }
            if over {
                continue;
            }

            let mut values: Vec<Value> = constraint
                .scope
                .iter()
                .map(|s| self.assigned[s.index()].unwrap_or(0))
                .collect();

            match open {
                None => {
                    if !(constraint.test)(&values) {
                        self.conflict_seen[ci] = true;
                        return false;
                    }
                }
                Some((pos, w)) => {
                    let mut kept = Domain::empty();
                    for cand in self.domains[w.index()].iter() {
                        values[pos] = cand;
                        if (constraint.test)(&values) {
                            kept.insert(cand);
                        }
                    }
                    if kept.is_empty() {
                        self.conflict_seen[ci] = true;
                        return false;
                    }
                    if kept != self.domains[w.index()] {
                        self.narrow(w.index(), kept);
                    }
                }
            }
        }
        true
    }

    fn narrow(&mut self, var: usize, to: Domain) {
        self.trail.push((var, self.domains[var]));
        self.domains[var] = to;
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let (var, old) = self.trail.pop().expect("trail mark within bounds");
            self.domains[var] = old;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::Tier;

    #[test]
    fn empty_problem_has_one_trivial_solution() {
        let report = solve_all(&Problem::new(), 8);
        assert_eq!(report.solutions.len(), 1);
        assert!(!report.truncated);
    }

    #[test]
    fn functional_constraint_forces_value() {
        let mut p = Problem::new();
        let a = p.add_var("a", Tier::SupportStatus, Domain::singleton(2));
        let b = p.add_var("b", Tier::Strength, Domain::range(0, 10));
        p.add_constraint("b_is_a_plus_one", vec![a, b], |v| v[1] == v[0] + 1);
        let report = solve_all(&p, 8);
        assert_eq!(report.solutions.len(), 1);
        assert_eq!(report.solutions[0].value(b), 3);
    }

    #[test]
    fn enumerates_all_solutions_deterministically() {
        let mut p = Problem::new();
        let a = p.add_var("a", Tier::Outcome, Domain::range(0, 2));
        let b = p.add_var("b", Tier::Outcome, Domain::range(0, 2));
        p.add_constraint("a_ne_b", vec![a, b], |v| v[0] != v[1]);
        let report = solve_all(&p, 16);
        assert_eq!(report.solutions.len(), 6);
        let pairs: Vec<(Value, Value)> =
            report.solutions.iter().map(|s| (s.value(a), s.value(b))).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]);
    }

    #[test]
    fn unsatisfiable_reports_conflicting_constraint() {
        let mut p = Problem::new();
        let a = p.add_var("a", Tier::Outcome, Domain::range(0, 1));
        let b = p.add_var("b", Tier::Outcome, Domain::range(0, 1));
        p.add_constraint("a_lt_b", vec![a, b], |v| v[0] < v[1]);
        let bad = p.add_constraint("a_gt_b", vec![a, b], |v| v[0] > v[1]);
        let report = solve_all(&p, 8);
        assert!(report.solutions.is_empty());
        assert!(report.conflicts.contains(&bad));
    }

    #[test]
    fn solution_cap_truncates() {
        let mut p = Problem::new();
        for i in 0..4 {
            p.add_var(format!("v{i}"), Tier::Outcome, Domain::range(0, 1));
        }
        let report = solve_all(&p, 3);
        assert_eq!(report.solutions.len(), 3);
        assert!(report.truncated);
    }

    #[test]
    fn forward_checking_prunes_cycles() {
        // A three-variable cycle with equality constraints has exactly the
        // two uniform assignments.
        let mut p = Problem::new();
        let a = p.add_var("a", Tier::Outcome, Domain::range(0, 1));
        let b = p.add_var("b", Tier::Outcome, Domain::range(0, 1));
        let c = p.add_var("c", Tier::Outcome, Domain::range(0, 1));
        p.add_constraint("a_eq_b", vec![a, b], |v| v[0] == v[1]);
        p.add_constraint("b_eq_c", vec![b, c], |v| v[0] == v[1]);
        p.add_constraint("c_eq_a", vec![c, a], |v| v[0] == v[1]);
        let report = solve_all(&p, 8);
        assert_eq!(report.solutions.len(), 2);
        for s in &report.solutions {
            assert_eq!(s.value(a), s.value(b));
            assert_eq!(s.value(b), s.value(c));
        }
    }

    #[test]
    fn tier_orders_search_but_not_solutions() {
        let mut p = Problem::new();
        let hi = p.add_var("hi", Tier::Outcome, Domain::range(0, 1));
        let lo = p.add_var("lo", Tier::SupportStatus, Domain::range(0, 1));
        p.add_constraint("sum_is_one", vec![hi, lo], |v| v[0] + v[1] == 1);
        let report = solve_all(&p, 8);
        assert_eq!(report.solutions.len(), 2);
        // The low-tier variable drives the enumeration order.
        assert_eq!(report.solutions[0].value(lo), 0);
        assert_eq!(report.solutions[0].value(hi), 1);
        assert_eq!(report.solutions[1].value(lo), 1);
        assert_eq!(report.solutions[1].value(hi), 0);
    }
}
