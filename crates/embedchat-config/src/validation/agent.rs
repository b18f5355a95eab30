use crate::schema::AgentConfig;

use super::helpers::is_url_path_safe;

pub(super) fn validate_agent(errors: &mut Vec<String>, agent: &AgentConfig) {
    if agent.token.is_empty() {
        errors.push("agent.token must not be empty".into());
    } else if !is_url_path_safe(&agent.token) {
        errors.push(format!(
            "agent.token '{}' may only contain letters, digits, '-' and '_'",
            agent.token
        ));
    }

    if let Some(target) = &agent.target {
        if target.trim().is_empty() {
            errors.push("agent.target must not be blank when set".into());
        }
    }
}
