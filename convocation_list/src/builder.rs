pub use crate::config::*;

/// A builder for the pools of one education level.
///
/// Rows must be added in rank order. Program and candidate names are trimmed,
/// and rows missing either of them are rejected.
///
/// ```
/// pub use convocation_list::builder::Builder;
/// pub use convocation_list::Category;
/// # use convocation_list::PoolErrors;
///
/// let mut builder = Builder::new("ENSINO SUPERIOR");
///
/// builder.add_row(Category::Geral, "DIREITO", " Ana Souza ")?;
/// builder.add_row(Category::Pcd, "DIREITO", "Bruno Lima")?;
/// assert!(builder.add_row(Category::Negro, "DIREITO", "  ").is_err());
///
/// let pools = builder.build();
/// let list = convocation_list::aggregate_level(&pools);
/// assert_eq!(list[0].candidate, "Bruno Lima");
/// assert_eq!(list[1].candidate, "Ana Souza");
///
/// # Ok::<(), PoolErrors>(())
/// ```
pub struct Builder {
    pub(crate) _pools: LevelPools,
}

impl Builder {
    pub fn new(level: &str) -> Builder {
        Builder {
            _pools: LevelPools {
                level: level.trim().to_string(),
                ..LevelPools::default()
            },
        }
    }

    /// Appends a candidate at the end of the pool of the given category.
    pub fn add_row(
        &mut self,
        category: Category,
        program: &str,
        name: &str,
    ) -> Result<(), PoolErrors> {
        let program = program.trim();
        let name = name.trim();
        if program.is_empty() {
            return Err(PoolErrors::EmptyProgram {
                name: name.to_string(),
            });
        }
        if name.is_empty() {
            return Err(PoolErrors::EmptyName {
                program: program.to_string(),
            });
        }
        let row = PoolRow {
            program: program.to_string(),
            name: name.to_string(),
        };
        match category {
            Category::Geral => self._pools.geral.push(row),
            Category::Negro => self._pools.negro.push(row),
            Category::Pcd => self._pools.pcd.push(row),
        }
        Ok(())
    }

    /// Appends a whole ranked pool. Stops at the first invalid row.
    pub fn add_rows<'a, I>(&mut self, category: Category, rows: I) -> Result<(), PoolErrors>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (program, name) in rows {
            self.add_row(category, program, name)?;
        }
        Ok(())
    }

    pub fn build(self) -> LevelPools {
        self._pools
    }
}
