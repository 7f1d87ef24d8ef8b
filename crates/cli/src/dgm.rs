use groovyscope_groovy::InferenceEngine;
use groovyscope_groovy::inference::DgmSignature;

pub fn run(engine: &InferenceEngine, receiver: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let table = engine.dgm();
    let mut signatures: Vec<&DgmSignature> = match receiver {
        Some(receiver) => table.signatures_for(receiver).collect(),
        None => table.signatures().collect(),
    };
    if signatures.is_empty() {
        if let Some(receiver) = receiver {
            return Err(format!("no extension methods declared on {}", receiver).into());
        }
    }
    signatures.sort_by(|a, b| (&a.receiver, &a.name, a.arity()).cmp(&(&b.receiver, &b.name, b.arity())));

    println!("Groovy {}: {} extension methods", table.version(), signatures.len());
    for signature in signatures {
        println!("{}", describe(signature));
    }
    Ok(())
}

/// `java.util.List#each(groovy.lang.Closure) -> java.util.List<T> [closure, since 1.0]`
fn describe(signature: &DgmSignature) -> String {
    let params: Vec<String> = signature.params.iter().map(|p| p.to_string()).collect();
    let mut line = format!(
        "{}#{}({}) -> {}",
        signature.receiver,
        signature.name,
        params.join(", "),
        signature.returns
    );
    let mut notes = Vec::new();
    if signature.closure.is_some() {
        notes.push("closure".to_string());
    }
    notes.push(format!("since {}", signature.since));
    line.push_str(&format!(" [{}]", notes.join(", ")));
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovyscope_groovy::GroovyVersion;
    use groovyscope_groovy::inference::ClosureParams;
    use groovyscope_api::TypeRef;

    #[test]
    fn test_describe_signature() {
        let signature = DgmSignature {
            receiver: "java.lang.Number".to_string(),
            name: "times".to_string(),
            params: vec![TypeRef::new("groovy.lang.Closure")],
            returns: TypeRef::new("void"),
            closure: Some(ClosureParams::Fixed(vec![TypeRef::new("java.lang.Integer")])),
            since: GroovyVersion::V1_7,
        };
        assert_eq!(
            describe(&signature),
            "java.lang.Number#times(groovy.lang.Closure) -> void [closure, since 1.7]"
        );
    }
}
