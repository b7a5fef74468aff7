/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable([u64; 256]);

pub fn tally_frequency(bytes: &[u8]) -> FrequencyTable {
    let mut table = FrequencyTable([0; 256]);
    bytes
        .iter()
        .for_each(|byte| table.0[*byte as usize] += 1);
    table
}

impl FrequencyTable {
    pub fn count(&self, symbol: u8) -> u64 {
        self.0[symbol as usize]
    }

    /// Number of symbols that occur at least once.
    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|count| **count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Symbols with a non-zero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = FrequencyTable([0; 256]);
        for (symbol, count) in iter {
            table.0[symbol as usize] += count;
        }
        table
    }
}
