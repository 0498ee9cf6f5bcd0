use core_types::{FundDataset, SectionSpec, Template};

/// Decides which template sections a fund's data can support.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionFilter;

impl SectionFilter {
    /// The sections of `template` whose data dependencies are all present, in
    /// template order. Each is paired with its index in `template.sections`.
    pub fn eligible<'a>(template: &'a Template, data: &FundDataset) -> Vec<(usize, &'a SectionSpec)> {
        Self::retain(template.sections.iter().enumerate(), data)
    }

    /// Filters an arbitrary run of indexed sections. Applying it to its own output is
    /// a no-op.
    pub fn retain<'a, I>(sections: I, data: &FundDataset) -> Vec<(usize, &'a SectionSpec)>
    where
        I: IntoIterator<Item = (usize, &'a SectionSpec)>,
    {
        sections
            .into_iter()
            .filter(|(_, section)| match Self::missing_dependency(section, data) {
                Some(dataset) => {
                    tracing::debug!(
                        fund_id = %data.fund_id,
                        section = %section.title,
                        dataset,
                        "Section excluded: dataset not available."
                    );
                    false
                }
                None => true,
            })
            .collect()
    }

    fn missing_dependency<'a>(section: &'a SectionSpec, data: &FundDataset) -> Option<&'a str> {
        section
            .data_dependencies()
            .find(|dataset| !data.has_extension(dataset))
    }
}
