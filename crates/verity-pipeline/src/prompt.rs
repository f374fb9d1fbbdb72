//! Research prompt construction
//!
//! Builds the single generation prompt from the request and whatever the
//! memory store has learned about the domain. Context sections are only
//! emitted when they have content, so a cold store yields a plain prompt.

use verity_memory::RelevantContext;

/// Leading instruction for every research prompt
const BASE_INSTRUCTION: &str = "Write a well-structured research summary on the topic below. \
     Support every factual claim with a citation.";

/// Builder for the research generation prompt
///
/// # Examples
///
/// ```
/// use verity_pipeline::ResearchPrompt;
///
/// let prompt = ResearchPrompt::new("solar capacity growth", "energy").build();
/// assert!(prompt.contains("solar capacity growth"));
/// assert!(prompt.contains("Domain: energy"));
/// ```
#[derive(Debug, Clone)]
pub struct ResearchPrompt {
    topic: String,
    domain: String,
    requirements: Option<String>,
    structure_hints: Vec<String>,
    pitfalls: Vec<String>,
    preferred_sources: Vec<String>,
}

impl ResearchPrompt {
    /// Start a prompt for a topic within a domain
    pub fn new(topic: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            domain: domain.into(),
            requirements: None,
            structure_hints: Vec::new(),
            pitfalls: Vec::new(),
            preferred_sources: Vec::new(),
        }
    }

    /// Attach free-form user requirements
    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    /// Fold learned context into the prompt
    pub fn with_context(mut self, context: &RelevantContext) -> Self {
        for structure in &context.successful_structures {
            let sections = structure
                .get("section_count")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            let density = structure
                .get("citation_density")
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            if sections > 0.0 {
                self.structure_hints.push(format!(
                    "{} sections, about {:.1} citations per section",
                    sections as u64, density
                ));
            }
        }

        self.pitfalls.extend(context.common_pitfalls.iter().cloned());

        self.preferred_sources.extend(
            context
                .domain_knowledge
                .top_sources(5)
                .into_iter()
                .map(|(source, _)| source.to_string()),
        );

        self
    }

    /// Render the final prompt text
    pub fn build(&self) -> String {
        let mut prompt = format!(
            "{}\n\nTopic: {}\nDomain: {}\n",
            BASE_INSTRUCTION, self.topic, self.domain
        );

        if let Some(requirements) = &self.requirements {
            prompt.push_str(&format!("\nRequirements: {}\n", requirements));
        }

        if !self.structure_hints.is_empty() {
            prompt.push_str("\nStructures that verified well previously:\n");
            for hint in &self.structure_hints {
                prompt.push_str(&format!("- {}\n", hint));
            }
        }

        if !self.pitfalls.is_empty() {
            prompt.push_str("\nAvoid these known issues:\n");
            for pitfall in &self.pitfalls {
                prompt.push_str(&format!("- {}\n", pitfall));
            }
        }

        if !self.preferred_sources.is_empty() {
            prompt.push_str("\nSources that verified well in this domain:\n");
            for source in &self.preferred_sources {
                prompt.push_str(&format!("- {}\n", source));
            }
        }

        prompt
    }
}
