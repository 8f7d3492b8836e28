use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{0}' is not of the form SECTION.OPTION=VALUE (e.g., 'setup.watermodel=tip3p').")]
    InvalidAssignment(String),

    #[error("Component '{component}' cannot be empty in '{assignment}'.")]
    EmptyComponent {
        component: &'static str,
        assignment: String,
    },
}

/// A parsed `SECTION.OPTION=VALUE` override. The value is kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub section: &'a str,
    pub option: &'a str,
    pub value: &'a str,
}

/// Splits `SECTION.OPTION=VALUE`. The section ends at the last `.` before
/// the `=`, so section names may themselves contain dots.
pub fn parse_assignment(assignment: &str) -> Result<Assignment<'_>, ParseError> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(assignment.to_string()))?;
    let (section, option) = key
        .trim()
        .rsplit_once('.')
        .ok_or_else(|| ParseError::InvalidAssignment(assignment.to_string()))?;

    let empty = |component| ParseError::EmptyComponent {
        component,
        assignment: assignment.to_string(),
    };
    let section = section.trim();
    let option = option.trim();
    if section.is_empty() {
        return Err(empty("section"));
    }
    if option.is_empty() {
        return Err(empty("option"));
    }

    Ok(Assignment {
        section,
        option,
        value: value.trim(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_section_option_and_value() {
        assert_eq!(
            parse_assignment("setup.watermodel=tip3p").unwrap(),
            Assignment {
                section: "setup",
                option: "watermodel",
                value: "tip3p"
            }
        );
    }

    #[test]
    fn value_may_contain_equals_signs_and_spaces() {
        let parsed = parse_assignment(" FEP.description = a = b ").unwrap();
        assert_eq!(parsed.section, "FEP");
        assert_eq!(parsed.value, "a = b");
    }

    #[test]
    fn last_dot_separates_option() {
        let parsed = parse_assignment("a.b.c=1").unwrap();
        assert_eq!(parsed.section, "a.b");
        assert_eq!(parsed.option, "c");
    }

    #[test]
    fn missing_equals_or_dot_is_rejected() {
        assert_eq!(
            parse_assignment("setup.watermodel"),
            Err(ParseError::InvalidAssignment("setup.watermodel".to_string()))
        );
        assert_eq!(
            parse_assignment("watermodel=tip3p"),
            Err(ParseError::InvalidAssignment("watermodel=tip3p".to_string()))
        );
    }

    #[test]
    fn empty_components_are_rejected() {
        assert!(matches!(
            parse_assignment(".watermodel=tip3p"),
            Err(ParseError::EmptyComponent { component: "section", .. })
        ));
        assert!(matches!(
            parse_assignment("setup.=tip3p"),
            Err(ParseError::EmptyComponent { component: "option", .. })
        ));
    }
}
