mod config;
pub mod builder;
pub mod manual;
pub mod stats;

use log::{debug, info, warn};

use std::collections::{BTreeSet, HashMap, HashSet};

pub use crate::config::*;

// **** Private structures ****

// A read-only view over one ranked pool. The cursor only moves forward: every
// name it passes over, convoked or not, is never looked at again.
#[derive(Debug, Clone)]
struct PoolCursor<'a> {
    pool: &'a [String],
    idx: usize,
}

impl<'a> PoolCursor<'a> {
    fn new(pool: &'a [String]) -> PoolCursor<'a> {
        PoolCursor { pool, idx: 0 }
    }

    fn next_unconvoked(&mut self, convoked: &HashSet<&'a str>) -> Option<&'a str> {
        let pool: &'a [String] = self.pool;
        while let Some(name) = pool.get(self.idx) {
            self.idx += 1;
            if !convoked.contains(name.as_str()) {
                return Some(name.as_str());
            }
        }
        None
    }
}

struct Cursors<'a> {
    geral: PoolCursor<'a>,
    negro: PoolCursor<'a>,
    pcd: PoolCursor<'a>,
}

impl<'a> Cursors<'a> {
    fn new(pools: &'a CoursePools) -> Cursors<'a> {
        Cursors {
            geral: PoolCursor::new(&pools.geral),
            negro: PoolCursor::new(&pools.negro),
            pcd: PoolCursor::new(&pools.pcd),
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut PoolCursor<'a> {
        match category {
            Category::Geral => &mut self.geral,
            Category::Negro => &mut self.negro,
            Category::Pcd => &mut self.pcd,
        }
    }

    /// Picks the candidate for a position expecting the given category.
    /// The quota categories fall back to the open competition pool, GERAL has
    /// no fallback.
    fn select(
        &mut self,
        expected: Category,
        convoked: &HashSet<&'a str>,
    ) -> Option<(&'a str, Category)> {
        if let Some(name) = self.get_mut(expected).next_unconvoked(convoked) {
            return Some((name, expected));
        }
        match expected {
            Category::Geral => None,
            Category::Negro | Category::Pcd => self
                .geral
                .next_unconvoked(convoked)
                .map(|name| (name, Category::Geral)),
        }
    }
}

/// The category reserved for a 1-based position of the list.
///
/// Every block of 10 positions holds 1 PCD slot (ending in 1), 3 NEGRO slots
/// (ending in 3, 6, 9) and 6 GERAL slots.
///
/// ```
/// use convocation_list::{classify, Category};
///
/// assert_eq!(classify(1), Category::Pcd);
/// assert_eq!(classify(13), Category::Negro);
/// assert_eq!(classify(20), Category::Geral);
/// ```
pub fn classify(position: u32) -> Category {
    match position % 10 {
        1 => Category::Pcd,
        3 | 6 | 9 => Category::Negro,
        _ => Category::Geral,
    }
}

/// The number of distinct candidate names across the three pools of a program.
pub fn universe_size(pools: &CoursePools) -> usize {
    Category::ALL
        .iter()
        .flat_map(|c| pools.pool(*c).iter())
        .map(|s| s.as_str())
        .collect::<HashSet<&str>>()
        .len()
}

/// Builds the ordered convocation list of a single program.
///
/// Arguments:
/// * `pools` the three ranked pools of the program. They are only read.
/// * `program` and `level` are copied into every entry.
///
/// The list stops at the first position that can be filled neither from the
/// expected pool nor from the GERAL fallback. Candidates that remain in other
/// pools at that point are not listed: compare the length of the result with
/// `universe_size` to detect it.
pub fn allocate_course(pools: &CoursePools, program: &str, level: &str) -> Vec<ConvocationEntry> {
    let target = universe_size(pools);
    debug!(
        "allocate_course: {:?} ({:?}): geral={} negro={} pcd={} universe={}",
        program,
        level,
        pools.geral.len(),
        pools.negro.len(),
        pools.pcd.len(),
        target
    );

    let mut cursors = Cursors::new(pools);
    let mut convoked: HashSet<&str> = HashSet::new();
    let mut res: Vec<ConvocationEntry> = Vec::new();
    let mut position: u32 = 1;

    while convoked.len() < target {
        let expected = classify(position);
        match cursors.select(expected, &convoked) {
            Some((name, category)) => {
                if category != expected {
                    debug!(
                        "allocate_course: {:?} position {}: no {} left, {} takes it as {}",
                        program, position, expected, name, category
                    );
                }
                convoked.insert(name);
                res.push(ConvocationEntry {
                    position,
                    category,
                    candidate: name.to_string(),
                    program: program.to_string(),
                    level: level.to_string(),
                });
                position += 1;
            }
            None => {
                debug!(
                    "allocate_course: {:?} position {} ({}) cannot be filled, stopping with {}/{} convoked",
                    program,
                    position,
                    expected,
                    convoked.len(),
                    target
                );
                break;
            }
        }
    }
    res
}

// Positions start at 1 and have no gaps, and no name shows up twice.
fn is_well_formed(entries: &[ConvocationEntry]) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    entries
        .iter()
        .enumerate()
        .all(|(idx, e)| e.position as usize == idx + 1 && seen.insert(e.candidate.as_str()))
}

fn partition_by_program<'a>(
    rows: &'a [PoolRow],
    category: Category,
    courses: &mut HashMap<&'a str, CoursePools>,
) {
    for row in rows.iter() {
        let pools = courses.entry(row.program.as_str()).or_default();
        match category {
            Category::Geral => pools.geral.push(row.name.clone()),
            Category::Negro => pools.negro.push(row.name.clone()),
            Category::Pcd => pools.pcd.push(row.name.clone()),
        }
    }
}

/// Runs the allocation for every program of a level.
///
/// Programs are processed in lexicographic order. Only the programs found in
/// the GERAL pool are considered: a program that only appears in the NEGRO or
/// PCD pools gets no list.
pub fn aggregate_level(pools: &LevelPools) -> Vec<ConvocationEntry> {
    aggregate_level_with_reports(pools).0
}

/// Same as `aggregate_level`, also returning how much of each program's
/// candidates made it into the list.
pub fn aggregate_level_with_reports(
    pools: &LevelPools,
) -> (Vec<ConvocationEntry>, Vec<CourseReport>) {
    info!(
        "Processing level {:?}: geral={} negro={} pcd={}",
        pools.level,
        pools.geral.len(),
        pools.negro.len(),
        pools.pcd.len()
    );

    let mut courses: HashMap<&str, CoursePools> = HashMap::new();
    for category in Category::ALL {
        partition_by_program(pools.pool(category), category, &mut courses);
    }

    let programs: BTreeSet<&str> = pools.geral.iter().map(|r| r.program.as_str()).collect();

    let mut skipped: Vec<&str> = courses
        .keys()
        .filter(|p| !programs.contains(*p))
        .cloned()
        .collect();
    skipped.sort_unstable();
    for program in skipped {
        warn!(
            "Level {:?}: program {:?} has no GERAL candidates, skipping it",
            pools.level, program
        );
    }

    let mut entries: Vec<ConvocationEntry> = Vec::new();
    let mut reports: Vec<CourseReport> = Vec::new();
    for program in programs {
        // Every program in the set has at least one GERAL row.
        let course_pools = match courses.get(program) {
            Some(x) => x,
            None => continue,
        };
        let course = allocate_course(course_pools, program, &pools.level);
        debug_assert!(
            is_well_formed(&course),
            "malformed list for program {:?}",
            program
        );

        let report = CourseReport {
            program: program.to_string(),
            level: pools.level.clone(),
            universe: universe_size(course_pools),
            emitted: course.len(),
        };
        info!("  {}: {} convocations", program, report.emitted);
        if report.is_under_filled() {
            warn!(
                "  {}: only {} of {} candidates could be placed, the list stopped early",
                program, report.emitted, report.universe
            );
        }
        entries.extend(course);
        reports.push(report);
    }

    info!("Level {:?}: {} convocations", pools.level, entries.len());
    (entries, reports)
}

/// Concatenates the lists of several levels, in the given order.
///
/// There is no deduplication across levels.
pub fn combine_levels(levels: &[Vec<ConvocationEntry>]) -> Vec<ConvocationEntry> {
    let res: Vec<ConvocationEntry> = levels.iter().flatten().cloned().collect();
    info!(
        "Combined {} levels: {} convocations",
        levels.len(),
        res.len()
    );
    res
}
