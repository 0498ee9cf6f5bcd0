use crate::error::ComposeError;
use crate::hydrate::Hydrator;
use crate::warning::CompositionWarning;
use core_types::{ChartId, MetricsProfile, Priority, RenderPlan, ResolvedSection, SectionSpec, Template};
use std::collections::HashSet;

/// Turns eligible sections into a `RenderPlan`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanAssembler {
    hydrator: Hydrator,
}

impl PlanAssembler {
    pub fn new(hydrator: Hydrator) -> Self {
        Self { hydrator }
    }

    /// Hydrates the report title, subtitle and each section's commentary, keeping only
    /// the first section that shows any given chart. Section titles are copied as is.
    ///
    /// `sections` must already be filtered and paired with their index in
    /// `template.sections`; their order is preserved.
    pub fn assemble(
        &self,
        template: &Template,
        sections: &[(usize, &SectionSpec)],
        profile: &MetricsProfile,
    ) -> Result<(RenderPlan, Vec<CompositionWarning>), ComposeError> {
        let mut warnings = Vec::new();

        let report_title = self.hydrate(&template.report_title, "report_title", profile, &mut warnings)?;
        let report_subtitle =
            self.hydrate(&template.report_subtitle, "report_subtitle", profile, &mut warnings)?;

        let mut seen: HashSet<ChartId> = HashSet::new();
        let mut resolved = Vec::with_capacity(sections.len());

        for &(index, section) in sections {
            if let Some(chart) = section.chart {
                if !seen.insert(chart) {
                    tracing::warn!(chart = %chart, section = %section.title, "Duplicate chart dropped.");
                    warnings.push(CompositionWarning::DuplicateChart {
                        chart,
                        section: section.title.clone(),
                    });
                    continue;
                }
            }

            let commentary = self.hydrate(
                &section.commentary_template,
                &format!("sections[{}].commentary", index),
                profile,
                &mut warnings,
            )?;

            resolved.push(ResolvedSection {
                title: section.title.clone(),
                chart: section.chart,
                commentary,
                priority: Priority::High,
                include_holdings_table: section.include_holdings_table,
            });
        }

        let plan = RenderPlan {
            report_title,
            report_subtitle,
            fund_character: None,
            sections: resolved,
        };
        Ok((plan, warnings))
    }

    fn hydrate(
        &self,
        text: &str,
        field: &str,
        profile: &MetricsProfile,
        warnings: &mut Vec<CompositionWarning>,
    ) -> Result<String, ComposeError> {
        let hydrated = self.hydrator.fill(text, profile)?;
        for name in hydrated.unresolved {
            tracing::warn!(placeholder = %name, field, "Placeholder left unresolved.");
            warnings.push(CompositionWarning::UnresolvedPlaceholder {
                name,
                field: field.to_string(),
            });
        }
        Ok(hydrated.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn section(title: &str, chart: Option<ChartId>, commentary: &str) -> SectionSpec {
        SectionSpec {
            title: title.into(),
            chart,
            commentary_template: commentary.into(),
            requires_data: None,
            include_holdings_table: false,
        }
    }

    fn template(sections: Vec<SectionSpec>) -> Template {
        Template {
            template_id: "t".into(),
            name: "T".into(),
            description: String::new(),
            match_criteria: BTreeMap::new(),
            report_title: "{fund_name} Quarterly Report".into(),
            report_subtitle: "As of {as_of}".into(),
            sections,
        }
    }

    fn profile() -> MetricsProfile {
        let mut p = MetricsProfile::new();
        p.insert("fund_name", "Alpha Aggressive Growth Fund");
        p.insert("n_holdings", 12usize);
        p
    }

    #[test]
    fn first_section_per_chart_wins() {
        let t = template(vec![
            section("Allocation", Some(ChartId::PieChart), "first"),
            section("Holdings", None, "{n_holdings} positions"),
            section("Allocation Again", Some(ChartId::PieChart), "second"),
        ]);
        let sections: Vec<_> = t.sections.iter().enumerate().collect();
        let (plan, warnings) = PlanAssembler::default().assemble(&t, &sections, &profile()).unwrap();

        assert_eq!(plan.sections.len(), 2);
        assert_eq!(plan.sections[0].commentary, "first");
        assert_eq!(plan.sections[1].commentary, "12 positions");
        assert!(plan.sections.iter().all(|s| s.priority == Priority::High));
        assert_eq!(plan.fund_character, None);
        assert!(warnings.contains(&CompositionWarning::DuplicateChart {
            chart: ChartId::PieChart,
            section: "Allocation Again".into(),
        }));
    }

    #[test]
    fn title_and_subtitle_are_hydrated() {
        let t = template(vec![section("Intro", None, "")]);
        let sections: Vec<_> = t.sections.iter().enumerate().collect();
        let (plan, warnings) = PlanAssembler::default().assemble(&t, &sections, &profile()).unwrap();

        assert_eq!(plan.report_title, "Alpha Aggressive Growth Fund Quarterly Report");
        assert_eq!(plan.report_subtitle, "As of {as_of}");
        assert_eq!(
            warnings,
            vec![CompositionWarning::UnresolvedPlaceholder {
                name: "as_of".into(),
                field: "report_subtitle".into(),
            }]
        );
    }

    #[test]
    fn section_titles_are_copied_verbatim() {
        let t = template(vec![section("Returns for {fund_name}", None, "ok")]);
        let sections: Vec<_> = t.sections.iter().enumerate().collect();
        let assembler = PlanAssembler::new(Hydrator::new(core_types::PlaceholderPolicy::Strict));
        let (plan, _) = assembler.assemble(&t, &sections, &profile()).unwrap();
        assert_eq!(plan.sections[0].title, "Returns for {fund_name}");
    }

    #[test]
    fn warnings_name_the_template_index() {
        let t = template(vec![
            section("Income", Some(ChartId::IncomeChart), "dropped upstream"),
            section("Outlook", None, "{outlook}"),
        ]);
        let sections = vec![(1, &t.sections[1])];
        let (_, warnings) = PlanAssembler::default().assemble(&t, &sections, &profile()).unwrap();
        assert!(warnings.contains(&CompositionWarning::UnresolvedPlaceholder {
            name: "outlook".into(),
            field: "sections[1].commentary".into(),
        }));
    }
}
