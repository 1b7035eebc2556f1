//! Mesh output implementation
use super::Mesh;
use std::io::{BufWriter, Write};

impl<M> Mesh<M> {
    /// Writes a binary STL to the given output
    ///
    /// STL has no room for normals or texture coordinates, so only positions
    /// are written; facet normals are recomputed from the winding.
    pub fn write_stl<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        // We're going to do many small writes and will typically be writing to
        // a file, so using a `BufWriter` saves excessive syscalls.
        let mut out = BufWriter::new(out);
        const HEADER: &[u8] = b"Binary STL file exported by Strokemesh";
        static_assertions::const_assert!(HEADER.len() <= 80);
        out.write_all(HEADER)?;
        out.write_all(&[0u8; 80 - HEADER.len()])?;
        out.write_all(&(self.triangles.len() as u32).to_le_bytes())?;
        for t in &self.triangles {
            let normal = self.face_normal(t);
            let normal = normal.try_normalize(0.0).unwrap_or(normal);
            for p in &normal {
                out.write_all(&p.to_le_bytes())?;
            }
            for v in t {
                for p in &self.vertices[*v].pos {
                    out.write_all(&p.to_le_bytes())?;
                }
            }
            out.write_all(&[0u8; std::mem::size_of::<u16>()])?; // attributes
        }
        out.flush()?;
        Ok(())
    }

    /// Writes a Wavefront OBJ to the given output
    ///
    /// Positions, texture coordinates, and normals are all written, sharing
    /// the same index for each vertex.
    pub fn write_obj<F: std::io::Write>(
        &self,
        out: &mut F,
    ) -> Result<(), crate::Error> {
        let mut out = BufWriter::new(out);
        writeln!(out, "# exported by Strokemesh")?;
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v.pos.x, v.pos.y, v.pos.z)?;
        }
        for v in &self.vertices {
            writeln!(out, "vt {} {}", v.uv.x, v.uv.y)?;
        }
        for v in &self.vertices {
            writeln!(out, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
        }
        for t in &self.triangles {
            // OBJ indices are 1-based
            let [a, b, c] = [t.x + 1, t.y + 1, t.z + 1];
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::mesh::{build_point_cloud_mesh, build_tube_mesh};
    use nalgebra::Vector3;

    #[test]
    fn stl_size() {
        let mesh = build_point_cloud_mesh(&[0.0, 0.0, 0.0, 1.0], ()).unwrap();
        let mut out = vec![];
        mesh.write_stl(&mut out).unwrap();
        assert_eq!(out.len(), 84 + 12 * 50);
        assert_eq!(u32::from_le_bytes(out[80..84].try_into().unwrap()), 12);
    }

    #[test]
    fn obj_lines() {
        let points = [Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0)];
        let mesh = build_tube_mesh(0.1, &points, ()).unwrap();
        let mut out = vec![];
        mesh.write_obj(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let count = |prefix: &str| {
            text.lines().filter(|l| l.starts_with(prefix)).count()
        };
        assert_eq!(count("v "), mesh.vertices.len());
        assert_eq!(count("vt "), mesh.vertices.len());
        assert_eq!(count("vn "), mesh.vertices.len());
        assert_eq!(count("f "), mesh.triangles.len());
        assert!(text.lines().any(|l| l == "f 1/1/1 11/11/11 2/2/2"));
    }
}
