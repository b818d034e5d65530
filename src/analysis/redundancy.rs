//! Detection of redundant, impossible, and cyclic prerequisites within a
//! single term.
//!
//! [`PrereqGraph`] flattens a term's requirement tables into a directed
//! graph: an edge from a course to each course mentioned anywhere in its
//! requirements, on the assumption that a student takes every alternative.
//! [`analyze`] walks the graph course by course and reports:
//!
//! - *redundant* prerequisites: directly listed courses that are already
//!   implied transitively by another listed prerequisite;
//! - *nonexistent* prerequisites: requirement chains ending at a course the
//!   term does not offer;
//! - prerequisite *cycles*, which are data errors in the catalog.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use petgraph::{
    algo::{is_cyclic_directed, tarjan_scc},
    graph::{DiGraph, NodeIndex},
};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::domain::{CourseCode, RequirementSet};

/// A chain of courses, each requiring the next.
pub type PrereqChain = Vec<CourseCode>;

/// One term's prerequisite structure, flattened for reachability queries.
#[derive(Debug, Clone)]
pub struct PrereqGraph {
    /// Flattened direct prerequisites per offered course, in order of first
    /// mention.
    direct: BTreeMap<CourseCode, Vec<CourseCode>>,
    graph: DiGraph<CourseCode, ()>,
}

impl PrereqGraph {
    /// Flatten a term's requirement tables into a graph.
    #[must_use]
    pub fn new(requirements: &BTreeMap<CourseCode, RequirementSet>) -> Self {
        let direct: BTreeMap<CourseCode, Vec<CourseCode>> = requirements
            .iter()
            .map(|(course, set)| {
                let prereqs = set.mentioned_courses().into_iter().cloned().collect();
                (course.clone(), prereqs)
            })
            .collect();

        let mut graph = DiGraph::new();
        let mut indices: HashMap<CourseCode, NodeIndex> = HashMap::new();
        for (course, prereqs) in &direct {
            let from = Self::node_index(&mut graph, &mut indices, course);
            for prereq in prereqs {
                let to = Self::node_index(&mut graph, &mut indices, prereq);
                graph.add_edge(from, to, ());
            }
        }

        Self { direct, graph }
    }

    fn node_index(
        graph: &mut DiGraph<CourseCode, ()>,
        indices: &mut HashMap<CourseCode, NodeIndex>,
        course: &CourseCode,
    ) -> NodeIndex {
        if let Some(&index) = indices.get(course) {
            return index;
        }
        let index = graph.add_node(course.clone());
        indices.insert(course.clone(), index);
        index
    }

    /// Whether the course is offered this term.
    #[must_use]
    pub fn is_offered(&self, course_code: &CourseCode) -> bool {
        self.direct.contains_key(course_code)
    }

    /// The course's flattened direct prerequisites, in order of first
    /// mention. Empty for courses not offered this term.
    #[must_use]
    pub fn direct_prereqs(&self, course_code: &CourseCode) -> &[CourseCode] {
        self.direct.get(course_code).map_or(&[], Vec::as_slice)
    }

    /// Every offered course, sorted.
    pub fn courses(&self) -> impl Iterator<Item = &CourseCode> {
        self.direct.keys()
    }

    /// Whether any prerequisite cycle exists.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// The strongly connected components containing a cycle (including a
    /// course requiring itself), each sorted, the whole list sorted.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<CourseCode>> {
        let mut cycles = Vec::new();

        for component in tarjan_scc(&self.graph) {
            if component.len() > 1 {
                let mut courses: Vec<CourseCode> = component
                    .into_iter()
                    .map(|index| self.graph[index].clone())
                    .collect();
                courses.sort();
                cycles.push(courses);
                continue;
            }

            let Some(&node) = component.first() else {
                continue;
            };

            if self.graph.contains_edge(node, node) {
                cycles.push(vec![self.graph[node].clone()]);
            }
        }

        cycles.sort();
        cycles
    }
}

/// The findings of [`analyze`] for one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RedundancyReport {
    redundant: BTreeMap<CourseCode, BTreeSet<CourseCode>>,
    nonexistent: BTreeMap<CourseCode, Vec<PrereqChain>>,
    cycles: Vec<PrereqChain>,
}

impl RedundancyReport {
    /// For each affected course, the directly listed prerequisites already
    /// implied by another listed prerequisite.
    #[must_use]
    pub const fn redundant(&self) -> &BTreeMap<CourseCode, BTreeSet<CourseCode>> {
        &self.redundant
    }

    /// For each course referenced but not offered this term, the requirement
    /// chains leading to it. Each chain runs from the missing course up to
    /// the course whose analysis found it.
    #[must_use]
    pub const fn nonexistent(&self) -> &BTreeMap<CourseCode, Vec<PrereqChain>> {
        &self.nonexistent
    }

    /// The distinct prerequisite cycles encountered, one chain per cycle.
    #[must_use]
    pub fn cycles(&self) -> &[PrereqChain] {
        &self.cycles
    }

    /// Whether the term has no findings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.redundant.is_empty() && self.nonexistent.is_empty() && self.cycles.is_empty()
    }
}

struct Findings {
    redundant: BTreeSet<CourseCode>,
    nonexistent: Vec<PrereqChain>,
}

/// Walk everything implied by `course`'s direct prerequisites.
///
/// The walk is iterative with an explicit stack; a back-edge to a course on
/// the current path is reported as a cycle and not followed, so cyclic data
/// cannot hang the analysis.
fn explore(
    course: &CourseCode,
    graph: &PrereqGraph,
    cycles: &mut Vec<PrereqChain>,
    seen_cycles: &mut HashSet<BTreeSet<CourseCode>>,
) -> Findings {
    let taken: HashSet<&CourseCode> = graph.direct_prereqs(course).iter().collect();
    let mut explored: HashSet<CourseCode> = HashSet::new();
    let mut redundant = BTreeSet::new();
    let mut nonexistent = Vec::new();

    for direct in graph.direct_prereqs(course) {
        if !graph.is_offered(direct) {
            nonexistent.push(vec![direct.clone(), course.clone()]);
            continue;
        }
        if !explored.insert(direct.clone()) {
            continue;
        }

        let mut stack: Vec<(CourseCode, usize)> = vec![(direct.clone(), 0)];
        while let Some(position) = stack.len().checked_sub(1) {
            let (node, cursor) = stack[position].clone();
            let children = graph.direct_prereqs(&node);
            let Some(child) = children.get(cursor) else {
                stack.pop();
                continue;
            };
            stack[position].1 += 1;

            // The child is reachable even when it closes a cycle below.
            if taken.contains(child) {
                redundant.insert(child.clone());
            }

            if let Some(start) = stack.iter().position(|(on_path, _)| on_path == child) {
                let mut cycle: PrereqChain =
                    stack[start..].iter().map(|(c, _)| c.clone()).collect();
                cycle.push(child.clone());
                if seen_cycles.insert(cycle.iter().cloned().collect()) {
                    let rendered = cycle
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" -> ");
                    warn!(cycle = %rendered, "prerequisite cycle detected");
                    cycles.push(cycle);
                }
                continue;
            }

            if !graph.is_offered(child) {
                let mut chain: PrereqChain = vec![child.clone()];
                chain.extend(stack.iter().rev().map(|(on_path, _)| on_path.clone()));
                chain.push(course.clone());
                nonexistent.push(chain);
                continue;
            }

            if explored.insert(child.clone()) {
                stack.push((child.clone(), 0));
            }
        }
    }

    Findings {
        redundant,
        nonexistent,
    }
}

/// Analyze one term's prerequisite graph for redundant, nonexistent, and
/// cyclic prerequisites.
///
/// Each distinct cycle is reported once, no matter how many walks encounter
/// it.
#[must_use]
#[instrument(skip_all)]
pub fn analyze(graph: &PrereqGraph) -> RedundancyReport {
    let mut report = RedundancyReport::default();
    let mut seen_cycles = HashSet::new();

    for course in graph.courses() {
        let findings = explore(course, graph, &mut report.cycles, &mut seen_cycles);
        if !findings.redundant.is_empty() {
            report.redundant.insert(course.clone(), findings.redundant);
        }
        for chain in findings.nonexistent {
            report
                .nonexistent
                .entry(chain[0].clone())
                .or_default()
                .push(chain);
        }
    }

    report
}

/// Courses with a requirement group whose only alternative is not offered
/// this term, leaving the course impossible to enroll in from the catalog
/// alone.
#[must_use]
pub fn unsatisfiable_requirements(
    requirements: &BTreeMap<CourseCode, RequirementSet>,
) -> BTreeMap<CourseCode, Vec<CourseCode>> {
    let mut unsatisfiable = BTreeMap::new();
    for (course, set) in requirements {
        let missing: Vec<CourseCode> = set
            .iter()
            .filter(|group| group.len() == 1)
            .map(|group| &group.alternatives()[0].course_code)
            .filter(|prereq| !requirements.contains_key(*prereq))
            .cloned()
            .collect();
        if !missing.is_empty() {
            unsatisfiable.insert(course.clone(), missing);
        }
    }
    unsatisfiable
}
