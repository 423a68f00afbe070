//! Owned storage for a [`Graph`].
//!
//! [`Graph`] borrows everything it looks at. `GraphData` is the producer
//! side: it owns the vertices, the processed edge table and both lexicons,
//! and hands out graphs that borrow from it.

use crate::builder_error::BuilderError;
use crate::geometry::S2Point;
use crate::lexicon::IdSetLexicon;

use super::{
    Edge, EdgeType, Graph, GraphOptions, InputEdgeIdSetId, Label, LabelSetId, VertexId,
};

#[derive(Clone, Debug)]
pub struct GraphData {
    options: GraphOptions,
    vertices: Vec<S2Point>,
    edges: Vec<Edge>,
    input_edge_id_set_ids: Vec<InputEdgeIdSetId>,
    input_edge_id_set_lexicon: IdSetLexicon,
    label_set_ids: Vec<LabelSetId>,
    label_set_lexicon: IdSetLexicon,
}

impl GraphData {
    /// Builds graph storage from snapped input edges. Input edge `i` is
    /// `input_edges[i]`; no labels are attached.
    ///
    /// For undirected options each input edge is stored as a sibling pair
    /// whose reverse half carries no input edge id. The edges are then run
    /// through [`Graph::process_edges`], and the resulting options (whose
    /// edge type may have changed) are the ones the graph reports.
    ///
    /// A [`BuilderError::MissingSiblings`] from processing is returned as
    /// is; the partially processed storage is dropped.
    pub fn build(
        options: GraphOptions,
        vertices: Vec<S2Point>,
        input_edges: &[Edge],
    ) -> Result<Self, BuilderError> {
        Self::build_labeled(options, vertices, input_edges, &[])
    }

    /// Like [`GraphData::build`], with `labels[i]` attached to input edge
    /// `i`. Input edges beyond the end of `labels` get no labels.
    pub fn build_labeled(
        mut options: GraphOptions,
        vertices: Vec<S2Point>,
        input_edges: &[Edge],
        labels: &[Vec<Label>],
    ) -> Result<Self, BuilderError> {
        let nv = vertices.len() as VertexId;
        if let Some(&(v0, v1)) = input_edges
            .iter()
            .find(|&&(v0, v1)| !(0..nv).contains(&v0) || !(0..nv).contains(&v1))
        {
            return Err(BuilderError::InvariantViolation(format!(
                "input edge ({v0}, {v1}) references a vertex outside 0..{nv}"
            )));
        }

        let mut input_edge_id_set_lexicon = IdSetLexicon::new();
        let capacity = match options.edge_type {
            EdgeType::Directed => input_edges.len(),
            EdgeType::Undirected => 2 * input_edges.len(),
        };
        let mut edges = Vec::with_capacity(capacity);
        let mut input_edge_id_set_ids = Vec::with_capacity(capacity);
        for (i, &edge) in input_edges.iter().enumerate() {
            edges.push(edge);
            input_edge_id_set_ids.push(IdSetLexicon::add_singleton(i as i32));
            if options.edge_type == EdgeType::Undirected {
                edges.push((edge.1, edge.0));
                input_edge_id_set_ids.push(IdSetLexicon::empty_set_id());
            }
        }
        Graph::process_edges(
            &mut options,
            &mut edges,
            &mut input_edge_id_set_ids,
            &mut input_edge_id_set_lexicon,
        )?;

        let mut label_set_lexicon = IdSetLexicon::new();
        let label_set_ids = (0..input_edges.len())
            .map(|i| match labels.get(i) {
                Some(set) => label_set_lexicon.add(set.iter().copied()),
                None => IdSetLexicon::empty_set_id(),
            })
            .collect();

        Ok(Self {
            options,
            vertices,
            edges,
            input_edge_id_set_ids,
            input_edge_id_set_lexicon,
            label_set_ids,
            label_set_lexicon,
        })
    }

    /// Drops vertices with no incident edges (see
    /// [`Graph::filter_vertices`]). Does nothing unless the options allow
    /// vertex filtering.
    pub fn filter_vertices(&mut self, tmp: &mut Vec<VertexId>) {
        if !self.options.allow_vertex_filtering {
            return;
        }
        self.vertices = Graph::filter_vertices(&self.vertices, &mut self.edges, tmp);
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    pub fn vertices(&self) -> &[S2Point] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn graph(&self) -> Graph<'_> {
        Graph::new(
            self.options,
            &self.vertices,
            &self.edges,
            &self.input_edge_id_set_ids,
            &self.input_edge_id_set_lexicon,
            &self.label_set_ids,
            &self.label_set_lexicon,
        )
    }
}
