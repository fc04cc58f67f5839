//! Prompt templates for document synthesis.
//!
//! Every oracle call is a single text prompt: a system instruction, a blank
//! line, then the task. Create and update instructions differ per document
//! kind; the repair prompt is shared.

use serde_json::Value;

use crate::domain::conversation::Turn;

use super::document_kind::DocumentKind;

/// Whether the oracle is asked for a first draft or for a revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Create,
    Update,
}

/// Joins a system instruction and a task into one prompt.
pub fn compose(system: &str, task: &str) -> String {
    format!("{}\n\n{}", system, task)
}

/// Returns the system instruction for a kind and instruction.
pub fn system_prompt(kind: DocumentKind, instruction: InstructionKind) -> &'static str {
    match (kind, instruction) {
        (DocumentKind::FunctionalRequirements, InstructionKind::Create) => FUNCTIONAL_CREATE,
        (DocumentKind::FunctionalRequirements, InstructionKind::Update) => FUNCTIONAL_UPDATE,
        (DocumentKind::NonFunctionalRequirements, InstructionKind::Create) => NON_FUNCTIONAL_CREATE,
        (DocumentKind::NonFunctionalRequirements, InstructionKind::Update) => NON_FUNCTIONAL_UPDATE,
        (DocumentKind::ValidationReport, InstructionKind::Create) => VALIDATION_CREATE,
        (DocumentKind::ValidationReport, InstructionKind::Update) => VALIDATION_UPDATE,
        (DocumentKind::ProjectPlan, InstructionKind::Create) => PROJECT_PLAN_CREATE,
        (DocumentKind::ProjectPlan, InstructionKind::Update) => PROJECT_PLAN_UPDATE,
        (DocumentKind::BusinessPlan, InstructionKind::Create) => BUSINESS_PLAN_CREATE,
        (DocumentKind::BusinessPlan, InstructionKind::Update) => BUSINESS_PLAN_UPDATE,
    }
}

/// Task line for the first draft of a document.
pub fn create_task(kind: DocumentKind, description: &str) -> String {
    match kind {
        DocumentKind::FunctionalRequirements => format!(
            "Analyze this project and create comprehensive functional requirements: {}",
            description
        ),
        DocumentKind::NonFunctionalRequirements => format!(
            "Analyze this project and create comprehensive non-functional requirements: {}",
            description
        ),
        DocumentKind::ValidationReport => format!(
            "Create a comprehensive project validation report for this idea: {}",
            description
        ),
        DocumentKind::ProjectPlan => format!(
            "Create a comprehensive project plan for this idea: {}",
            description
        ),
        DocumentKind::BusinessPlan => description.to_string(),
    }
}

/// Task for revising an existing document.
///
/// `history` holds the turns that precede the new message.
pub fn update_task(kind: DocumentKind, current: &Value, history: &[Turn], message: &str) -> String {
    let name = kind.display_name();
    let current_json =
        serde_json::to_string_pretty(current).unwrap_or_else(|_| current.to_string());

    let mut context = format!("CURRENT {}:\n{}\n\n", name.to_uppercase(), current_json);
    context.push_str("CONVERSATION HISTORY:\n");
    for turn in history {
        context.push_str(&turn.render());
        context.push('\n');
    }

    format!(
        "{}\nUser: {}\n\nUpdate the {} based on this new input.",
        context, message, name
    )
}

/// Task asking the oracle to fix its own malformed output.
pub fn repair_task(malformed: &str) -> String {
    format!(
        "The previous JSON was malformed. Please fix it and return a valid JSON object. Here is the malformed JSON:\n{}",
        malformed
    )
}

// ============================================================================
// Functional Requirements
// ============================================================================

const FUNCTIONAL_CREATE: &str = r#"You are an expert business analyst and requirements engineer. When given a project description, generate comprehensive functional requirements in JSON format.

Include these sections ONLY if relevant to the project:
- stakeholders: Who uses or is affected by the system and what they need
- user_stories: "As a ... I want ... so that ..." stories, each with acceptance_criteria
- core_features: Functional capabilities grouped by feature area
- business_rules: Validation rules, constraints and policies the system enforces
- integrations: External systems, APIs and data exchanges
- data_requirements: Entities to store and reports to produce

IMPORTANT:
1. Generate ONLY valid JSON - no trailing commas, proper quotes
2. Use arrays for lists, strings for single values

Format your response as:
FUNCTIONAL_REQUIREMENTS: {json here}
MESSAGE: Brief explanation of what was generated"#;

const FUNCTIONAL_UPDATE: &str = r#"You are an expert business analyst and requirements engineer. Based on the conversation history and current functional requirements, update the requirements according to the user's new input.

Intelligently modify the existing requirements:
- If they add features, add user stories, acceptance criteria and business rules
- If they remove features, remove every related requirement
- If they change users or roles, update stakeholders and affected stories
- Be smart about cascading changes

Return the complete updated requirements in the same JSON format, plus a brief message explaining what changed.

Format your response as:
FUNCTIONAL_REQUIREMENTS: {updated json here}
MESSAGE: Brief explanation of changes made"#;

// ============================================================================
// Non-Functional Requirements
// ============================================================================

const NON_FUNCTIONAL_CREATE: &str = r#"You are an expert quality assurance engineer and system architect. When given a project description, generate comprehensive non-functional requirements (NFRs) in JSON format.

Include these quality attribute categories ONLY if relevant to the project:
- performance_requirements: Response times, throughput, capacity, scalability metrics
- availability_requirements: Uptime, recovery time, maintenance windows, disaster recovery
- reliability_requirements: MTBF, error rates, fault tolerance, backup strategies
- security_requirements: Authentication, authorization, encryption, compliance standards
- usability_requirements: User experience, accessibility, interface standards, learning curve
- compatibility_requirements: Browser support, OS compatibility, integration standards
- maintainability_requirements: Code standards, documentation, modularity, testability
- portability_requirements: Platform independence, deployment flexibility, migration support
- scalability_requirements: Load handling, resource scaling, growth projections
- compliance_requirements: Regulatory standards, industry certifications, legal requirements
- operational_requirements: Monitoring, logging, deployment, backup procedures
- environmental_requirements: Hardware specs, network requirements, infrastructure needs

For each category, include:
- specific_metrics: Quantifiable targets and thresholds (as array of strings)
- testing_criteria: How to verify and validate requirements (as array of strings)
- constraints: Limitations and boundaries (as array of strings)
- priority_level: Critical, High, Medium, Low (as string)

IMPORTANT:
1. Generate ONLY valid JSON - no trailing commas, proper quotes
2. Use arrays for lists, strings for single values

Format your response as:
NON_FUNCTIONAL_REQUIREMENTS: {json here}
MESSAGE: Brief explanation of what was generated"#;

const NON_FUNCTIONAL_UPDATE: &str = r#"You are an expert quality assurance engineer and system architect. Based on the conversation history and current non-functional requirements, update the NFRs according to the user's new input.

Intelligently modify the existing requirements:
- If they change performance targets, update metrics and testing criteria
- If they add security concerns, enhance security requirements and compliance
- If they modify user base, adjust scalability and performance requirements
- If they change platforms, update compatibility and portability requirements
- If they add regulations, update compliance and operational requirements
- Update testing criteria, constraints, and priority levels accordingly

Return the complete updated requirements structure, plus a brief message explaining what changed.

Format your response as:
NON_FUNCTIONAL_REQUIREMENTS: {updated json here}
MESSAGE: Brief explanation of changes made"#;

// ============================================================================
// Validation Report
// ============================================================================

const VALIDATION_CREATE: &str = r#"You are an expert project validation consultant. When given a project idea, generate a comprehensive validation report in JSON format.

Include these validation fields ONLY if relevant to the project (no hardcoding, no fallbacks):
- project_name: Clear project name
- concept_summary: Brief project description
- market_validation: Market size, target audience, demand analysis
- competitive_analysis: Competitors, market gaps, positioning
- technical_feasibility: Technology requirements, complexity assessment
- business_model: Revenue streams, pricing strategy, monetization
- risk_assessment: Technical, market, financial, operational risks
- validation_methods: How to test the concept (MVPs, surveys, pilots)
- success_metrics: KPIs and measurement criteria
- resource_requirements: Team, budget, time estimates
- go_to_market: Launch strategy and customer acquisition
- regulatory_compliance: Legal considerations if applicable
- scalability_potential: Growth opportunities and challenges

For each section, provide:
- current_status: Assessment of current state
- validation_needed: What needs to be validated
- recommendations: Specific action items
- confidence_level: High/Medium/Low confidence in assessment

Format your response as:
VALIDATION_REPORT: {json here}
MESSAGE: Your explanation here"#;

const VALIDATION_UPDATE: &str = r#"You are an expert project validation consultant. Based on the conversation history and current validation report, update the report according to the user's new information or requirements.

Intelligently modify the existing validation:
- If they provide market research data, update market validation
- If they change target audience, update competitive analysis and business model
- If they add new features, reassess technical feasibility and risks
- If they provide budget constraints, update resource requirements
- Update confidence levels, recommendations, and validation methods accordingly

Return the complete updated validation report in the same JSON format, plus a brief message explaining what changed.

Format your response as:
VALIDATION_REPORT: {updated json here}
MESSAGE: Brief explanation of changes made"#;

// ============================================================================
// Project Plan
// ============================================================================

const PROJECT_PLAN_CREATE: &str = r#"You are an expert software project planner. When given a project idea, generate a comprehensive project plan in JSON format.

Include these fields ONLY if relevant to the project (no hardcoding, no fallbacks):
- project_name: Clear project name
- description: Brief project description
- applications: Details about mobile_app, web_app, desktop_app (only if needed)
- website: If a marketing website is needed
- hardware_components: Only if hardware is involved
- infrastructure: Cloud services, databases, authentication, etc.
- resources: Team requirements and skills
- environments: dev, staging, production setup
- scaling_plan: Expected users and scaling strategy
- budget_estimate: Cost breakdown
- timeline: Project phases with duration

For each application type, include:
- platforms: Target platforms
- frontend: Technologies
- backend: Technologies
- database: Database choice
- features: Key features list

Format your response as:
PROJECT_PLAN: {json here}
MESSAGE: Your explanation here"#;

const PROJECT_PLAN_UPDATE: &str = r#"You are an expert software project planner. Based on the conversation history and current project plan, update the plan according to the user's new requirements.

Intelligently modify the existing plan:
- If they change technology stack, update all related sections
- If they remove features, remove related components
- If they add features, add necessary infrastructure
- Update team skills, timeline, budget accordingly

Return the complete updated project plan in the same JSON format, plus a brief message explaining what changed.

Format your response as:
PROJECT_PLAN: {updated json here}
MESSAGE: Brief explanation of changes made"#;

// ============================================================================
// Business Plan
// ============================================================================

const BUSINESS_PLAN_CREATE: &str = r#"You are a business planning expert. Write the business plan requested below as a single JSON object with one key per section (executive_summary, business_description, market_analysis, marketing_and_sales, operations, financial_projections, implementation_roadmap, appendices). Each section holds the detailed content the request asks for.

Format your response as:
BUSINESS_PLAN: {json here}
MESSAGE: A brief congratulatory message thanking the user for the information they provided"#;

const BUSINESS_PLAN_UPDATE: &str = r#"You are a business planning expert. Based on the conversation history and current business plan, update the plan according to the user's new input. Keep every section consistent with the change.

Return the complete updated business plan in the same JSON format, plus a brief message explaining what changed.

Format your response as:
BUSINESS_PLAN: {updated json here}
MESSAGE: Brief explanation of changes made"#;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_system_prompt_names_its_label() {
        for kind in DocumentKind::ALL {
            for instruction in [InstructionKind::Create, InstructionKind::Update] {
                let prompt = system_prompt(kind, instruction);
                assert!(
                    prompt.contains(kind.labels().leading),
                    "{:?}/{:?} prompt lacks label",
                    kind,
                    instruction
                );
                assert!(prompt.contains("MESSAGE:"));
            }
        }
    }

    #[test]
    fn compose_separates_with_blank_line() {
        assert_eq!(compose("SYSTEM", "TASK"), "SYSTEM\n\nTASK");
    }

    #[test]
    fn create_task_embeds_description() {
        let task = create_task(DocumentKind::ProjectPlan, "Mobile app for food delivery");
        assert!(task.ends_with("Mobile app for food delivery"));
    }

    #[test]
    fn update_task_lays_out_document_history_and_message() {
        let history = vec![Turn::user("Food delivery app"), Turn::assistant("Plan ready.")];
        let task = update_task(
            DocumentKind::ProjectPlan,
            &json!({"project_name": "Courier"}),
            &history,
            "Add a web dashboard",
        );

        assert!(task.starts_with("CURRENT PROJECT PLAN:\n{\n  \"project_name\": \"Courier\"\n}\n\n"));
        assert!(task.contains(
            "CONVERSATION HISTORY:\nUser: Food delivery app\nAssistant: Plan ready.\n"
        ));
        assert!(task.ends_with(
            "\nUser: Add a web dashboard\n\nUpdate the project plan based on this new input."
        ));
    }

    #[test]
    fn repair_task_quotes_malformed_text() {
        let task = repair_task("{\"a\": }");
        assert!(task.starts_with("The previous JSON was malformed."));
        assert!(task.ends_with("Here is the malformed JSON:\n{\"a\": }"));
    }
}
