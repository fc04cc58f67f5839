//! Prompt templates for the question-driven business plan dialogue.

use super::analyzer::SufficiencyVocabulary;

/// Asks for a short, encouraging introduction to the user's idea.
pub fn intro_prompt(idea: &str) -> String {
    format!(
        r#"You are a business consultant. A user wants to start this business: "{idea}"

Generate an enthusiastic, encouraging response that:
1. Acknowledges their specific business idea positively (mention what you understand about it)
2. Shows genuine interest in their concept
3. Mentions you'll ask just a few essential questions to create their business plan
4. Explains they can respond with just numbers for quick answers
5. Keep it brief and professional
6. Be specific to their business idea, not generic

Generate only the response text, nothing else."#
    )
}

/// Asks whether the conversation holds enough information for a plan.
pub fn sufficiency_prompt(vocabulary: SufficiencyVocabulary, conversation: &str) -> String {
    format!(
        r#"You are a business consultant. Analyze this conversation to determine if you have enough information to create a comprehensive business plan.

CONVERSATION:
{conversation}

Consider:
- Do you understand the business concept clearly?
- Do you know who the customers are?
- Do you understand how money will be made?
- Do you know how the business will operate?
- Do you understand resources/timeline needs?

Respond with ONLY "{yes}" or "{no}" - nothing else."#,
        yes = vocabulary.affirmative(),
        no = vocabulary.negative(),
    )
}

/// Asks for the single most important next multiple-choice question.
pub fn question_prompt(conversation: &str, min_options: usize, max_options: usize) -> String {
    format!(
        r#"You are a business consultant. Based on this conversation, generate the MOST IMPORTANT next question to help create a business plan.

CONVERSATION SO FAR:
{conversation}

Generate ONE specific question with {min_options}-{max_options} multiple choice options that will help you understand:
- What hasn't been covered yet that's critical for this business
- The most important missing piece of information
- Something specific to THEIR business idea, not generic

IMPORTANT: The user will respond with ONLY a number (1-{max_options}) corresponding to one of your options. Make sure all options are comprehensive and cover the main possibilities for this question.

If nothing important is missing, return {{"question": null, "options": []}}.

Return ONLY this JSON format:
{{
    "question": "Your specific question here?",
    "options": ["Option 1", "Option 2", "Option 3"]
}}"#
    )
}

/// Long-form business plan request built from the whole consultation.
///
/// Also returned to clients so it can be reused with another assistant.
pub fn final_plan_prompt(conversation: &str) -> String {
    format!(
        r#"You are a business planning expert. Based on the following consultation conversation, create a comprehensive business plan.

CONSULTATION CONVERSATION:
{conversation}

Create a detailed business plan with these sections:

1. **EXECUTIVE SUMMARY**
   - Business concept overview
   - Target market and value proposition
   - Financial highlights and funding needs
   - Success factors

2. **BUSINESS DESCRIPTION & STRATEGY**
   - Detailed product/service description
   - Business model and revenue streams
   - Competitive advantages
   - Mission and objectives

3. **MARKET ANALYSIS**
   - Industry overview and trends
   - Target customer analysis
   - Market size and opportunity
   - Competitive landscape

4. **MARKETING & SALES PLAN**
   - Customer acquisition strategy
   - Marketing channels and budget
   - Sales process and pricing
   - Brand positioning

5. **OPERATIONS PLAN**
   - Day-to-day operations
   - Technology and equipment needs
   - Staffing requirements
   - Supply chain and logistics

6. **FINANCIAL PROJECTIONS**
   - Startup costs breakdown
   - Revenue projections (3-year)
   - Operating expenses
   - Break-even analysis
   - Funding requirements

7. **IMPLEMENTATION ROADMAP**
   - Launch timeline with milestones
   - First 90 days action plan
   - Success metrics and KPIs
   - Risk mitigation strategies

8. **APPENDICES**
   - Market research data
   - Financial assumptions
   - Legal requirements
   - Supporting documents

Make all recommendations specific and actionable based on the business discussed. Include realistic timelines, budgets, and practical next steps."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufficiency_prompt_uses_vocabulary() {
        let prompt = sufficiency_prompt(SufficiencyVocabulary::Strict, "User: bakery");
        assert!(prompt.contains(r#"Respond with ONLY "SUFFICIENT" or "NEED_MORE""#));
        assert!(prompt.contains("CONVERSATION:\nUser: bakery"));
    }

    #[test]
    fn question_prompt_states_option_bounds() {
        let prompt = question_prompt("User: bakery", 3, 6);
        assert!(prompt.contains("3-6 multiple choice options"));
        assert!(prompt.contains("\"question\": \"Your specific question here?\""));
    }

    #[test]
    fn final_plan_prompt_has_eight_sections() {
        let prompt = final_plan_prompt("User: bakery");
        assert!(prompt.contains("1. **EXECUTIVE SUMMARY**"));
        assert!(prompt.contains("8. **APPENDICES**"));
    }

    #[test]
    fn intro_prompt_quotes_idea() {
        assert!(intro_prompt("Corner bakery").contains("\"Corner bakery\""));
    }
}
