use k8s_openapi::api::core::v1::Container;
use k8s_openapi::api::core::v1::EnvVar;

/// Prepend `var` to the container's env unless a variable with the same name
/// is already defined. The existing entry is kept whatever its value.
///
/// Returns whether the variable was inserted.
pub fn insert_env_if_absent(container: &mut Container, var: EnvVar) -> bool {
    let env = container.env.get_or_insert_with(Vec::new);
    if env.iter().any(|existing| existing.name == var.name) {
        return false;
    }
    env.insert(0, var);
    true
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn env_var(name: &str, value: &str) -> EnvVar {
        EnvVar {
            name: name.to_string(),
            value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn inserts_at_front() {
        let mut container = Container {
            name: "main".to_string(),
            env: Some(vec![env_var("A", "1"), env_var("B", "2")]),
            ..Default::default()
        };

        assert!(insert_env_if_absent(&mut container, env_var("C", "3")));
        assert_eq!(
            container.env,
            Some(vec![env_var("C", "3"), env_var("A", "1"), env_var("B", "2")])
        );
    }

    #[test]
    fn inserts_into_missing_env() {
        let mut container = Container::default();

        assert!(insert_env_if_absent(&mut container, env_var("C", "3")));
        assert_eq!(container.env, Some(vec![env_var("C", "3")]));
    }

    #[test]
    fn existing_name_wins() {
        let mut container = Container {
            env: Some(vec![env_var("A", "1"), env_var("C", "mine")]),
            ..Default::default()
        };

        assert!(!insert_env_if_absent(&mut container, env_var("C", "3")));
        assert_eq!(
            container.env,
            Some(vec![env_var("A", "1"), env_var("C", "mine")])
        );
    }
}
