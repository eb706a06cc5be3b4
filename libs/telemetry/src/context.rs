#[derive(Debug, Clone)]
pub struct TelemetryLabels {
    pub channel: String,
    pub direction: Option<String>,
    pub kind: Option<String>,
}

impl TelemetryLabels {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            direction: None,
            kind: None,
        }
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        let mut tags = Vec::with_capacity(3);
        tags.push(("channel".into(), self.channel.clone()));
        if let Some(direction) = &self.direction {
            tags.push(("direction".into(), direction.clone()));
        }
        if let Some(kind) = &self.kind {
            tags.push(("kind".into(), kind.clone()));
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_follow_declaration_order() {
        let labels = TelemetryLabels::new("smooch")
            .with_direction("inbound")
            .with_kind("reply");
        let keys: Vec<_> = labels.tags().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["channel", "direction", "kind"]);
        assert_eq!(TelemetryLabels::new("smooch").tags().len(), 1);
    }
}
