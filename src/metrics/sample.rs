use crate::error::Error;
use crate::metrics::descriptor::MetricDescriptor;

/// One observation of a descriptor, produced during a single scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub descriptor: &'static MetricDescriptor,
    /// Label values, positionally matching `descriptor.labels`.
    pub label_values: Vec<String>,
    pub value: f64,
}

impl MetricSample {
    pub fn new(descriptor: &'static MetricDescriptor, label_values: Vec<String>, value: f64) -> Self {
        debug_assert_eq!(
            descriptor.labels.len(),
            label_values.len(),
            "label arity mismatch for {}",
            descriptor.name
        );
        Self {
            descriptor,
            label_values,
            value,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    /// `(label name, label value)` pairs in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.descriptor
            .labels
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels().find(|(k, _)| *k == name).map(|(_, v)| v)
    }
}

/// Result of one scrape: the samples gathered so far plus the error that
/// stopped collection early, if any.
#[derive(Debug, Default)]
pub struct Collection {
    pub samples: Vec<MetricSample>,
    pub error: Option<Error>,
}

impl Collection {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn push(&mut self, descriptor: &'static MetricDescriptor, label_values: &[&str], value: f64) {
        let label_values = label_values.iter().map(|v| v.to_string()).collect();
        self.samples
            .push(MetricSample::new(descriptor, label_values, value));
    }

    pub fn of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MetricSample> + 'a {
        self.samples.iter().filter(move |s| s.name() == name)
    }
}
