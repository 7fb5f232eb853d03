use std::collections::HashMap;

/// Replace every `{{key}}` in `template` with `variables[key]`.
/// Unknown placeholders are left as they are.
///
/// ```
/// use std::collections::HashMap;
/// use nomnom_notification::domain::template::render;
///
/// let vars = HashMap::from([("name".to_owned(), "Ada".to_owned())]);
/// assert_eq!(render("Hi {{name}}, {{missing}}", &vars), "Hi Ada, {{missing}}");
/// ```
pub fn render(template: &str, variables: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match variables.get(key) {
                    Some(value) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
