// Summary statistics over a convocation list.

use std::collections::HashMap;

pub use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ConvocationStats {
    pub total: usize,
    /// Largest first, ties ordered by level name.
    pub by_level: Vec<(String, usize)>,
    /// Always the three categories, largest first. Ties keep the GERAL, NEGRO,
    /// PCD order.
    pub by_category: Vec<(Category, usize)>,
    /// Only the (level, category) pairs that occur, ordered by level name and
    /// then category.
    pub by_level_category: Vec<(String, Category, usize)>,
    /// The programs with the most convocations, largest first. Ties are
    /// ordered by program name.
    pub top_programs: Vec<(String, usize)>,
}

impl ConvocationStats {
    pub fn from_entries(
        entries: &[ConvocationEntry],
        num_top_programs: usize,
    ) -> ConvocationStats {
        let mut level_counts: HashMap<&str, usize> = HashMap::new();
        let mut category_counts: HashMap<Category, usize> = HashMap::new();
        let mut level_category_counts: HashMap<(&str, Category), usize> = HashMap::new();
        let mut program_counts: HashMap<&str, usize> = HashMap::new();

        for e in entries.iter() {
            *level_counts.entry(e.level.as_str()).or_insert(0) += 1;
            *category_counts.entry(e.category).or_insert(0) += 1;
            *level_category_counts
                .entry((e.level.as_str(), e.category))
                .or_insert(0) += 1;
            *program_counts.entry(e.program.as_str()).or_insert(0) += 1;
        }

        let by_level = largest_first(&level_counts);

        let mut by_category: Vec<(Category, usize)> = Category::ALL
            .iter()
            .map(|c| (*c, category_counts.get(c).cloned().unwrap_or(0)))
            .collect();
        by_category.sort_by(|(_, c1), (_, c2)| c2.cmp(c1));

        let mut by_level_category: Vec<(String, Category, usize)> = level_category_counts
            .iter()
            .map(|((l, c), count)| (l.to_string(), *c, *count))
            .collect();
        by_level_category.sort();

        let mut top_programs = largest_first(&program_counts);
        top_programs.truncate(num_top_programs);

        ConvocationStats {
            total: entries.len(),
            by_level,
            by_category,
            by_level_category,
            top_programs,
        }
    }
}

fn largest_first(counts: &HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut res: Vec<(String, usize)> = counts
        .iter()
        .map(|(k, count)| (k.to_string(), *count))
        .collect();
    res.sort_by(|(k1, c1), (k2, c2)| c2.cmp(c1).then_with(|| k1.cmp(k2)));
    res
}

/// A digest of the list, to compare two runs without keeping both lists
/// around. The same pools always give the same fingerprint.
pub fn fingerprint(entries: &[ConvocationEntry]) -> String {
    let mut canonical = String::new();
    for e in entries.iter() {
        canonical.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            e.position, e.category, e.candidate, e.program, e.level
        ));
    }
    sha256::digest(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        position: u32,
        category: Category,
        candidate: &str,
        program: &str,
        level: &str,
    ) -> ConvocationEntry {
        ConvocationEntry {
            position,
            category,
            candidate: candidate.to_string(),
            program: program.to_string(),
            level: level.to_string(),
        }
    }

    fn sample() -> Vec<ConvocationEntry> {
        vec![
            entry(1, Category::Pcd, "A", "DIREITO", "ENSINO SUPERIOR"),
            entry(2, Category::Geral, "B", "DIREITO", "ENSINO SUPERIOR"),
            entry(3, Category::Negro, "C", "DIREITO", "ENSINO SUPERIOR"),
            entry(1, Category::Geral, "D", "ADMINISTRACAO", "ENSINO SUPERIOR"),
            entry(1, Category::Geral, "A", "INFORMATICA", "NÍVEL TÉCNICO"),
            entry(2, Category::Geral, "E", "INFORMATICA", "NÍVEL TÉCNICO"),
        ]
    }

    #[test]
    fn counts() {
        let stats = ConvocationStats::from_entries(&sample(), 2);
        assert_eq!(stats.total, 6);
        assert_eq!(
            stats.by_level,
            vec![
                ("ENSINO SUPERIOR".to_string(), 4),
                ("NÍVEL TÉCNICO".to_string(), 2)
            ]
        );
        assert_eq!(
            stats.by_category,
            vec![(Category::Geral, 4), (Category::Negro, 1), (Category::Pcd, 1)]
        );
        assert_eq!(
            stats.by_level_category,
            vec![
                ("ENSINO SUPERIOR".to_string(), Category::Geral, 2),
                ("ENSINO SUPERIOR".to_string(), Category::Negro, 1),
                ("ENSINO SUPERIOR".to_string(), Category::Pcd, 1),
                ("NÍVEL TÉCNICO".to_string(), Category::Geral, 2),
            ]
        );
        assert_eq!(
            stats.top_programs,
            vec![("DIREITO".to_string(), 3), ("INFORMATICA".to_string(), 2)]
        );
    }

    #[test]
    fn largest_counts_first() {
        let entries = vec![
            entry(1, Category::Pcd, "A", "DIREITO", "NÍVEL TÉCNICO"),
            entry(1, Category::Pcd, "B", "MECANICA", "ENSINO SUPERIOR"),
            entry(2, Category::Geral, "C", "MECANICA", "ENSINO SUPERIOR"),
            entry(1, Category::Pcd, "D", "QUIMICA", "ENSINO SUPERIOR"),
        ];
        let stats = ConvocationStats::from_entries(&entries, 10);
        assert_eq!(
            stats.by_level,
            vec![
                ("ENSINO SUPERIOR".to_string(), 3),
                ("NÍVEL TÉCNICO".to_string(), 1)
            ]
        );
        assert_eq!(
            stats.by_category,
            vec![(Category::Pcd, 3), (Category::Geral, 1), (Category::Negro, 0)]
        );
        assert_eq!(
            stats.by_level_category,
            vec![
                ("ENSINO SUPERIOR".to_string(), Category::Geral, 1),
                ("ENSINO SUPERIOR".to_string(), Category::Pcd, 2),
                ("NÍVEL TÉCNICO".to_string(), Category::Pcd, 1),
            ]
        );
        assert_eq!(
            stats.top_programs,
            vec![
                ("MECANICA".to_string(), 2),
                ("DIREITO".to_string(), 1),
                ("QUIMICA".to_string(), 1)
            ]
        );
    }

    #[test]
    fn empty_list() {
        let stats = ConvocationStats::from_entries(&[], 10);
        assert_eq!(stats.total, 0);
        assert!(stats.by_level.is_empty());
        assert_eq!(
            stats.by_category,
            vec![(Category::Geral, 0), (Category::Negro, 0), (Category::Pcd, 0)]
        );
        assert!(stats.top_programs.is_empty());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let entries = sample();
        assert_eq!(fingerprint(&entries), fingerprint(&entries.clone()));
        assert_eq!(fingerprint(&entries).len(), 64);
        let mut other = entries.clone();
        other.swap(0, 1);
        assert_ne!(fingerprint(&entries), fingerprint(&other));
    }
}
